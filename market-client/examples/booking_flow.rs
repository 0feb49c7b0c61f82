//! Book a service and print the payment link
//!
//! Run against a live backend:
//!
//! ```bash
//! MARKET_API_URL=http://localhost:5000/api \
//!   cargo run -p market-client --example booking_flow -- <email> <password> <service-id>
//! ```

use market_client::flow::{BookingForm, PaymentOutcome};
use market_client::{AppContext, ClientConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "market_client=debug".into()),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let (Some(email), Some(password), Some(service_id)) = (args.next(), args.next(), args.next())
    else {
        eprintln!("usage: booking_flow <email> <password> <service-id>");
        std::process::exit(2);
    };

    let ctx = AppContext::new(ClientConfig::from_env().without_credential_file())?;
    let login = ctx.http().login(&email, &password).await?;
    println!("Logged in as {} ({:?})", login.user.name, login.user.role);

    let intake = ctx.booking_intake();
    let service = intake.load_service(&service_id).await?;
    println!("Service: {} - {} VND ({})", service.name, service.price, service.service_type);

    let mut form = BookingForm::for_user(&login.user, &service);
    form.address = "12 Lê Lợi, Quận 1".into();
    form.booking_date = "2026-10-20".into();
    form.booking_time = "09:30".into();
    if form.customer_phone.is_empty() {
        form.customer_phone = "0901234567".into();
    }

    let receipt = intake.submit(&service, &form).await?;
    println!("Booking {} created", receipt.booking.id);

    match receipt.payment {
        PaymentOutcome::Redirect { payment_url, .. } => println!("Pay at: {payment_url}"),
        PaymentOutcome::Deferred { reason, .. } => {
            println!("Payment not started: {reason}");
            println!("The booking stays pending and can be paid from the booking history.");
        }
    }

    Ok(())
}
