//! Small shared utilities

/// Honduras country code, the business's home market
const DEFAULT_COUNTRY_CODE: &str = "504";

/// Normalize a customer phone number for a WhatsApp deep link.
///
/// Strips every non-digit and prefixes the country code when the
/// number is local. Returns an empty string for empty input so
/// callers can skip rendering the contact action.
pub fn format_phone_for_whatsapp(phone: &str) -> String {
    let cleaned: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    if cleaned.is_empty() {
        return cleaned;
    }
    if cleaned.starts_with(DEFAULT_COUNTRY_CODE) {
        cleaned
    } else {
        format!("{DEFAULT_COUNTRY_CODE}{cleaned}")
    }
}

/// Build the wa.me link for a customer phone number
pub fn whatsapp_link(phone: &str, text: Option<&str>) -> Option<String> {
    let number = format_phone_for_whatsapp(phone);
    if number.is_empty() {
        return None;
    }
    match text {
        Some(t) => Some(format!(
            "https://wa.me/{}?text={}",
            number,
            urlencode(t)
        )),
        None => Some(format!("https://wa.me/{}", number)),
    }
}

/// Percent-encode a message body for a URL query value
fn urlencode(input: &str) -> String {
    let mut out = String::with_capacity(input.len() * 3);
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_number_gets_country_code() {
        assert_eq!(format_phone_for_whatsapp("9988-7766"), "50499887766");
    }

    #[test]
    fn test_international_number_unchanged() {
        assert_eq!(format_phone_for_whatsapp("+504 9988 7766"), "50499887766");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(format_phone_for_whatsapp(""), "");
        assert_eq!(format_phone_for_whatsapp("n/a"), "");
        assert!(whatsapp_link("", None).is_none());
    }

    #[test]
    fn test_whatsapp_link_with_text() {
        let link = whatsapp_link("99887766", Some("Pedido FC-1 listo")).unwrap();
        assert_eq!(
            link,
            "https://wa.me/50499887766?text=Pedido%20FC-1%20listo"
        );
    }
}
