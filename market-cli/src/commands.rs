//! Command handlers
//!
//! Each handler drives one workflow from the client library and prints the
//! result. Failures come back as [`anyhow::Error`] carrying the
//! user-facing message.

use anyhow::{Context, anyhow};
use market_client::flow::{BookingForm, ReviewDraft};
use market_client::{AppContext, BookingQuery, ClientError, ServiceQuery};

use crate::render;
use crate::{BookArgs, Command, PageArgs};

pub async fn run(ctx: &AppContext, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Login { email, password } => login(ctx, &email, &password).await,
        Command::Logout => {
            ctx.http().logout();
            println!("Đã đăng xuất");
            Ok(())
        }
        Command::Whoami => {
            let user = ctx.http().me().await.map_err(user_facing)?;
            render::user(&user);
            Ok(())
        }
        Command::Services {
            search,
            category,
            service_type,
            page,
        } => {
            let mut query = ServiceQuery::default().paginate(page.page, page.limit);
            if let Some(search) = search {
                query = query.search(search);
            }
            if let Some(category) = category {
                query = query.category(category);
            }
            if let Some(service_type) = service_type {
                query = query.service_type(service_type);
            }
            let page = ctx.http().search_services(&query).await.map_err(user_facing)?;
            render::services(&page);
            Ok(())
        }
        Command::Service { service_id } => show_service(ctx, &service_id).await,
        Command::Book(args) => book(ctx, args).await,
        Command::Pay { booking_id } => pay(ctx, &booking_id).await,
        Command::Return { url } => {
            let outcome = ctx.reconciler().reconcile_url(&url).await;
            render::reconcile(&outcome);
            Ok(())
        }
        Command::Bookings {
            status,
            payment_status,
            search,
            page,
        } => list_bookings(ctx, status, payment_status, search, page).await,
        Command::SetStatus { booking_id, status } => {
            let booking = ctx
                .http()
                .update_booking_status(&booking_id, status)
                .await
                .map_err(user_facing)?;
            render::booking(&booking);
            Ok(())
        }
        Command::SetPaymentStatus {
            booking_id,
            payment_status,
        } => {
            let booking = ctx
                .http()
                .update_payment_status(&booking_id, payment_status)
                .await
                .map_err(user_facing)?;
            render::booking(&booking);
            Ok(())
        }
        Command::Cancel { booking_id } => {
            let booking = ctx
                .http()
                .cancel_booking(&booking_id)
                .await
                .map_err(user_facing)?;
            render::booking(&booking);
            Ok(())
        }
        Command::Review {
            booking_id,
            rating,
            comment,
        } => review(ctx, &booking_id, rating, comment).await,
    }
}

/// Keep the message the user should see; the full error is logged
fn user_facing(e: ClientError) -> anyhow::Error {
    tracing::debug!("{e:?}");
    anyhow!(e.user_message())
}

async fn login(ctx: &AppContext, email: &str, password: &str) -> anyhow::Result<()> {
    let response = ctx
        .http()
        .login(email, password)
        .await
        .map_err(user_facing)?;
    println!("Đăng nhập thành công");
    render::user(&response.user);
    Ok(())
}

async fn show_service(ctx: &AppContext, service_id: &str) -> anyhow::Result<()> {
    let service = ctx
        .http()
        .get_service(service_id)
        .await
        .map_err(user_facing)?;
    render::service(&service);

    // reviews are informational; a failure here does not fail the command
    match ctx.http().service_reviews(service_id).await {
        Ok(reviews) => render::reviews(&reviews),
        Err(e) => tracing::warn!(service_id, "Could not load reviews: {e}"),
    }
    Ok(())
}

async fn book(ctx: &AppContext, args: BookArgs) -> anyhow::Result<()> {
    let intake = ctx.booking_intake();
    let service = intake
        .load_service(&args.service_id)
        .await
        .map_err(user_facing)?;

    let mut form = match ctx.current_user() {
        Some(user) => BookingForm::for_user(&user, &service),
        None => BookingForm {
            service_type: service.service_type,
            ..BookingForm::default()
        },
    };
    if let Some(name) = args.name {
        form.customer_name = name;
    }
    if let Some(phone) = args.phone {
        form.customer_phone = phone;
    }
    if let Some(email) = args.email {
        form.customer_email = email;
    }
    if let Some(service_type) = args.service_type {
        form.service_type = service_type;
    }
    form.address = args.address;
    form.booking_date = args.date;
    form.booking_time = args.time;
    form.notes = args.notes;

    let receipt = intake.submit(&service, &form).await.map_err(user_facing)?;
    println!("Đặt lịch thành công: {}", receipt.booking.id);
    render::payment(&receipt.payment);
    Ok(())
}

async fn pay(ctx: &AppContext, booking_id: &str) -> anyhow::Result<()> {
    let booking = ctx
        .http()
        .get_booking(booking_id)
        .await
        .map_err(user_facing)?;
    let outcome = ctx
        .payments()
        .retry_for(&booking)
        .await
        .map_err(user_facing)?;
    render::payment(&outcome);
    Ok(())
}

async fn list_bookings(
    ctx: &AppContext,
    status: Option<shared::models::BookingStatus>,
    payment_status: Option<shared::models::PaymentStatus>,
    search: Option<String>,
    page: PageArgs,
) -> anyhow::Result<()> {
    let mut history = ctx
        .history()
        .context("Vui lòng đăng nhập để xem lịch sử đặt lịch")?;

    let mut query = BookingQuery::new().paginate(page.page, page.limit);
    query.status = status;
    query.payment_status = payment_status;
    if let Some(search) = search {
        query = query.search(search);
    }

    let page = history.load(query).await.map_err(user_facing)?;
    render::bookings(page);
    Ok(())
}

async fn review(
    ctx: &AppContext,
    booking_id: &str,
    rating: Option<u8>,
    comment: String,
) -> anyhow::Result<()> {
    let booking = ctx
        .http()
        .get_booking(booking_id)
        .await
        .map_err(user_facing)?;
    let review = ctx
        .reviews()
        .submit(&booking, &ReviewDraft::new(rating, comment))
        .await
        .map_err(user_facing)?;
    println!("Đã gửi đánh giá {} sao", review.rating);
    Ok(())
}
