#[derive(Debug)]
pub enum Error {
    /// Fewer pixels than `width * height` were supplied.
    InsufficientPixels { expected: usize, actual: usize },
    IOError(std::io::Error),
    ImageError(image::ImageError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::InsufficientPixels { expected, actual } => write!(
                f,
                "expected at least {expected} pixels but only {actual} were supplied"
            ),
            Error::IOError(err) => write!(f, "{err}"),
            Error::ImageError(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::InsufficientPixels { .. } => None,
            Error::IOError(err) => Some(err),
            Error::ImageError(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IOError(err)
    }
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::ImageError(err)
    }
}
