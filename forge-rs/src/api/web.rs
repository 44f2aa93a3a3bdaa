//! HTML pages
//!
//! The checkout page only redirects the visitor to the external payment
//! provider. No confirmation callback is handled here; flipping an account
//! to subscriber is the out-of-scope webhook's job via
//! [`AccountStore::confirm_subscription`](crate::store::AccountStore::confirm_subscription).

use axum::{extract::State, response::Html};
use std::sync::Arc;

use crate::api::handlers::AppState;

/// GET /pay - Subscription checkout page (PayPal redirect form)
pub async fn pay_page(State(state): State<Arc<AppState>>) -> Html<String> {
    state.metrics.inc_requests();
    let billing = &state.billing;

    Html(format!(
        r#"<html><head><meta charset="utf-8"><meta name="viewport" content="width=device-width,initial-scale=1"/></head>
<body style="font-family:sans-serif; text-align:center; padding:30px;">
<h2>اشترك الآن للوصول غير المحدود</h2>
<p>الاشتراك الشهري: ${amount}</p>
<form action="https://www.paypal.com/cgi-bin/webscr" method="post" target="_blank">
  <input type="hidden" name="cmd" value="_xclick">
  <input type="hidden" name="business" value="{business}">
  <input type="hidden" name="item_name" value="{item_name}">
  <input type="hidden" name="amount" value="{amount}">
  <input type="hidden" name="currency_code" value="{currency}">
  <button type="submit" style="background:#0070ba;color:#fff;padding:10px 18px;border:none;border-radius:6px;cursor:pointer;">ادفع الآن عبر PayPal</button>
</form>
<p style="margin-top:20px;"><a href="/">العودة إلى الموقع</a></p>
</body></html>"#,
        amount = billing.amount,
        business = billing.business_email,
        item_name = billing.item_name,
        currency = billing.currency_code,
    ))
}
