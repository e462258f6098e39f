use std::fmt::{Display, Formatter, Result as FmtResult};

/// HTTP method used to request a provider's chapter listing.
///
/// Some sites only expose their chapter list through an AJAX endpoint that
/// rejects anything but `POST`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
}
impl Display for HttpMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
        }
    }
}
