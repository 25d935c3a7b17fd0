/// Percent-encode a vendor symbol for use in a query string or path
/// segment (`^DJI` → `%5EDJI`).
pub(crate) fn urlencode(raw: &str) -> String {
    url::form_urlencoded::byte_serialize(raw.as_bytes()).collect()
}
