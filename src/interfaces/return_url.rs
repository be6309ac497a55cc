use crate::domain::verification::OrderId;
use url::Url;

/// Name of the query parameter the payment provider appends on return.
pub const ORDER_ID_PARAM: &str = "orderId";

/// Extracts the order id from the payment-return URL.
///
/// An absent or empty parameter yields `None`; the first occurrence wins when
/// the parameter is repeated.
pub fn order_id_from_url(url: &Url) -> Option<OrderId> {
    url.query_pairs()
        .find(|(key, _)| key == ORDER_ID_PARAM)
        .and_then(|(_, value)| OrderId::new(value.into_owned()).ok())
}
