use crate::checkers::is_normalized_windows_drive_letter;
use crate::compat::{String, Vec};
use crate::error::PathError;
use crate::types::SchemeType;

/// The path of a URL record
///
/// `Opaque` belongs to cannot-be-a-base URLs (`mailto:x`, `data:...`) and is
/// never split into segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UrlPath {
    List(Vec<String>),
    Opaque(String),
}

impl Default for UrlPath {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

impl UrlPath {
    pub fn is_opaque(&self) -> bool {
        matches!(self, Self::Opaque(_))
    }

    /// Segments of a list path, `None` for an opaque one
    pub fn segments(&self) -> Option<&[String]> {
        match self {
            Self::List(segments) => Some(segments),
            Self::Opaque(_) => None,
        }
    }

    /// Number of segments; an opaque path counts as one.
    pub fn len(&self) -> usize {
        match self {
            Self::List(segments) => segments.len(),
            Self::Opaque(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::List(segments) if segments.is_empty())
    }

    /// Append a segment.
    ///
    /// # Errors
    ///
    /// [`PathError::OpaquePath`] if the path is opaque.
    pub fn push(&mut self, segment: String) -> Result<(), PathError> {
        match self {
            Self::List(segments) => {
                segments.push(segment);
                Ok(())
            }
            Self::Opaque(_) => Err(PathError::OpaquePath),
        }
    }

    /// Remove the last segment, except a lone normalized drive letter of a
    /// `file` URL. Shortening an empty path does nothing.
    ///
    /// # Errors
    ///
    /// [`PathError::OpaquePath`] if the path is opaque.
    pub fn shorten(&mut self, scheme_type: SchemeType) -> Result<(), PathError> {
        let Self::List(segments) = self else {
            return Err(PathError::OpaquePath);
        };
        if scheme_type == SchemeType::File
            && segments.len() == 1
            && is_normalized_windows_drive_letter(&segments[0])
        {
            return Ok(());
        }
        segments.pop();
        Ok(())
    }

    /// Append to the single string of an opaque path.
    ///
    /// # Errors
    ///
    /// [`PathError::NotOpaque`] if the path is a segment list.
    pub fn append_opaque(&mut self, s: &str) -> Result<(), PathError> {
        match self {
            Self::Opaque(path) => {
                path.push_str(s);
                Ok(())
            }
            Self::List(_) => Err(PathError::NotOpaque),
        }
    }

    /// Drop leading empty segments while more than one segment remains.
    /// Returns true if anything was removed.
    pub(crate) fn remove_leading_empty_segments(&mut self) -> bool {
        let Self::List(segments) = self else {
            return false;
        };
        let count = segments
            .iter()
            .take(segments.len().saturating_sub(1))
            .take_while(|segment| segment.is_empty())
            .count();
        segments.drain(..count);
        count > 0
    }

    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }
}

impl core::fmt::Display for UrlPath {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Opaque(path) => f.write_str(path),
            Self::List(segments) => {
                for segment in segments {
                    f.write_str("/")?;
                    f.write_str(segment)?;
                }
                Ok(())
            }
        }
    }
}
