use std::any::Any;

/// Extracts a readable message from a panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "unknown panic"
    }
}

#[cfg(test)]
mod tests {
    use super::panic_message;

    #[test]
    fn reads_str_and_string_payloads() {
        let literal = std::panic::catch_unwind(|| panic!("literal")).unwrap_err();
        let formatted = std::panic::catch_unwind(|| panic!("code {}", 7)).unwrap_err();
        let opaque = std::panic::catch_unwind(|| std::panic::panic_any(3u8)).unwrap_err();

        assert_eq!(panic_message(&*literal), "literal");
        assert_eq!(panic_message(&*formatted), "code 7");
        assert_eq!(panic_message(&*opaque), "unknown panic");
    }
}
