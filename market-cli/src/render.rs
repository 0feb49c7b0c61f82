//! Terminal output

use market_client::UserInfo;
use market_client::flow::{PaymentOutcome, ReconcileOutcome};
use shared::Page;
use shared::models::{Booking, Review, Service, StatusBadge};

fn badge(badge: StatusBadge) -> String {
    format!("[{}] {}", badge.color, badge.label)
}

pub fn user(user: &UserInfo) {
    println!("{} <{}> ({:?})", user.name, user.email, user.role);
    if let Some(shop_id) = &user.shop_id {
        println!("  shop: {shop_id}");
    }
}

pub fn services(page: &Page<Service>) {
    if page.data.is_empty() {
        println!("Không tìm thấy dịch vụ nào");
        return;
    }
    for service in &page.data {
        println!(
            "{:<26} {:<32} {:>12} VND  {:<8} {}",
            service.id,
            service.name,
            service.price,
            service.service_type,
            if service.is_available() { "" } else { "(tạm ngưng)" }
        );
    }
    footer(page);
}

pub fn service(service: &Service) {
    println!("{} ({})", service.name, service.id);
    println!("  Giá: {} VND, {} phút", service.price, service.duration);
    println!("  Loại: {}", service.service_type);
    if !service.categories.is_empty() {
        println!("  Danh mục: {}", service.categories.join(", "));
    }
    if !service.description.is_empty() {
        println!("  {}", service.description);
    }
}

pub fn reviews(reviews: &[Review]) {
    if reviews.is_empty() {
        println!("  Chưa có đánh giá");
        return;
    }
    for review in reviews {
        let author = review.customer_name.as_deref().unwrap_or("Khách hàng");
        println!("  {} sao - {author}: {}", review.rating, review.comment);
    }
}

pub fn booking(booking: &Booking) {
    println!(
        "{:<26} {} {}  {:<22} {:<22} {} VND",
        booking.id,
        booking.booking_date,
        booking.booking_time,
        badge(booking.status.badge()),
        badge(booking.payment_status.badge()),
        booking.total_amount
    );
}

pub fn bookings(page: &Page<Booking>) {
    if page.data.is_empty() {
        println!("Không có đơn đặt lịch nào");
        return;
    }
    for item in &page.data {
        booking(item);
    }
    footer(page);
}

fn footer<T>(page: &Page<T>) {
    let p = page.pagination;
    println!("-- trang {}/{} ({} kết quả)", p.page, p.pages.max(1), p.total);
    if p.has_next() {
        println!("-- xem tiếp: --page {}", p.page + 1);
    }
}

pub fn payment(outcome: &PaymentOutcome) {
    match outcome {
        PaymentOutcome::Redirect { payment_url, .. } => {
            println!("Mở liên kết sau để thanh toán:");
            println!("{payment_url}");
        }
        PaymentOutcome::Deferred { booking_id, reason } => {
            println!("Chưa thể tạo thanh toán: {reason}");
            println!("Đơn {booking_id} vẫn được giữ, thanh toán lại bằng `market pay {booking_id}`");
        }
    }
}

/// Confirmation failures stay in the log
pub fn reconcile(outcome: &ReconcileOutcome) {
    for line in reconcile_lines(outcome) {
        println!("{line}");
    }
}

fn reconcile_lines(outcome: &ReconcileOutcome) -> Vec<String> {
    let mut lines = vec![format!("{}: {}", outcome.status, outcome.message)];
    if let Some(booking_id) = &outcome.booking_id {
        lines.push(format!("  Mã đơn: {booking_id}"));
    }
    lines
}
