//! Payment Request Construction
//!
//! The sale is fixed: one line item, hardcoded amount and currency.
//! Callback URLs are resolved against the host the request arrived on.

use axum::http::{header, HeaderMap, Uri};
use paypal_checkout::{PaymentSpec, RedirectUrls};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::router::{EXECUTE_PAYMENT, PAYMENT_FAILED};

pub const SALE_TOTAL: Decimal = dec!(10.00);
pub const SALE_CURRENCY: &str = "USD";
pub const SALE_DESCRIPTION: &str = "Payment for Product/Service";

const FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Scheme and authority of the incoming request, e.g. `http://example.com`
///
/// Returns `None` when neither a `Host` header nor a URI authority is present.
pub fn request_origin(headers: &HeaderMap, uri: &Uri) -> Option<String> {
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .or_else(|| uri.authority().map(|a| a.as_str().to_string()))
        .filter(|h| !h.is_empty())?;

    let scheme = headers
        .get(FORWARDED_PROTO)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .and_then(web_scheme)
        .or_else(|| uri.scheme_str().and_then(web_scheme))
        .unwrap_or("http");

    Some(format!("{scheme}://{host}"))
}

/// Only `http` and `https` may end up in a callback URL
fn web_scheme(scheme: &str) -> Option<&'static str> {
    if scheme.eq_ignore_ascii_case("https") {
        Some("https")
    } else if scheme.eq_ignore_ascii_case("http") {
        Some("http")
    } else {
        None
    }
}

/// Return and cancel URLs for a given origin
pub fn callback_urls(origin: &str) -> RedirectUrls {
    RedirectUrls {
        return_url: format!("{origin}{EXECUTE_PAYMENT}"),
        cancel_url: format!("{origin}{PAYMENT_FAILED}"),
    }
}

/// The fixed sale submitted on every checkout
pub fn sale_request(origin: &str) -> PaymentSpec {
    PaymentSpec::sale(
        callback_urls(origin),
        SALE_TOTAL,
        SALE_CURRENCY,
        SALE_DESCRIPTION,
    )
}
