use crate::config::{Configuration, ResultEntry};

/// Discriminator used when the caller sends none, or an empty one.
pub const DEFAULT_DISCRIMINATOR: &str = "success";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution<'a> {
    Resolved(&'a ResultEntry),
    MethodNotFound,
    DiscriminatorNotFound,
}

pub fn effective_discriminator(discriminator: Option<&str>) -> &str {
    match discriminator {
        Some(value) if !value.is_empty() => value,
        _ => DEFAULT_DISCRIMINATOR,
    }
}

/// Two-stage lookup: first handler declared for `method`, then its first
/// entry declared for the discriminator.
pub fn resolve<'a>(
    config: &'a Configuration,
    method: &str,
    discriminator: Option<&str>,
) -> Resolution<'a> {
    let Some(handler) = config.find_handler(method) else {
        return Resolution::MethodNotFound;
    };

    match handler.find_result(effective_discriminator(discriminator)) {
        Some(entry) => Resolution::Resolved(entry),
        None => Resolution::DiscriminatorNotFound,
    }
}
