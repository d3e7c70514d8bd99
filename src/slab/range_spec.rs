use std::{fmt, str::FromStr};

use super::SlabError;

/// A user range specification on one dimension or coordinate.
///
/// Indices are as supplied and are normalized against the dimension size when merged.
/// An omitted start is the first index, an omitted end is the last index, and an omitted stride is 1.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RangeSpec {
    name: String,
    start: Option<u64>,
    end: Option<u64>,
    stride: Option<u64>,
}

impl RangeSpec {
    /// Create a new range specification.
    #[must_use]
    pub fn new(name: &str, start: Option<u64>, end: Option<u64>, stride: Option<u64>) -> Self {
        Self {
            name: name.to_string(),
            start,
            end,
            stride,
        }
    }

    /// Parse a range specification of the form `name[,[start][,[end][,[stride]]]]`.
    ///
    /// A single index without a trailing comma (`time,3`) selects just that index.
    /// A trailing comma (`time,3,`) leaves the end open.
    ///
    /// # Errors
    /// Returns [`SlabError::InvalidRange`] if the name is empty, there are more than four fields, or an index is not a non-negative integer.
    pub fn parse(range: &str) -> Result<Self, SlabError> {
        let invalid = |reason: &str| SlabError::InvalidRange(range.to_string(), reason.to_string());
        let fields: Vec<&str> = range.split(',').map(str::trim).collect();
        if fields.len() > 4 {
            return Err(invalid("too many fields"));
        }
        let name = fields[0];
        if name.is_empty() {
            return Err(invalid("missing name"));
        }
        let parse_index = |field: Option<&&str>| -> Result<Option<u64>, SlabError> {
            match field {
                None | Some(&"") => Ok(None),
                Some(field) => field
                    .parse::<u64>()
                    .map(Some)
                    .map_err(|err| invalid(&err.to_string())),
            }
        };
        let start = parse_index(fields.get(1))?;
        let end = if fields.len() == 2 {
            start
        } else {
            parse_index(fields.get(2))?
        };
        let stride = parse_index(fields.get(3))?;
        Ok(Self::new(name, start, end, stride))
    }

    /// The dimension or coordinate name targeted by the range.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The start index, if supplied.
    #[must_use]
    pub const fn start(&self) -> Option<u64> {
        self.start
    }

    /// The end index (inclusive), if supplied.
    #[must_use]
    pub const fn end(&self) -> Option<u64> {
        self.end
    }

    /// The stride, if supplied.
    #[must_use]
    pub const fn stride(&self) -> Option<u64> {
        self.stride
    }

    /// Normalize the range against a dimension of `size` and return `(start, end, stride)` as 0-based inclusive indices.
    ///
    /// Indices are converted from 1-based if `fortran` is true, then clamped to `[0, size)`.
    /// The returned start may exceed the returned end, which indicates a wrapped range.
    ///
    /// # Errors
    /// Returns a [`SlabError`] if the stride is zero, `size` is zero, or a 1-based index is zero.
    pub fn normalize(&self, size: u64, fortran: bool) -> Result<(u64, u64, u64), SlabError> {
        if size == 0 {
            return Err(SlabError::EmptyDimension(self.name.clone()));
        }
        let stride = self.stride.unwrap_or(1);
        if stride == 0 {
            return Err(SlabError::InvalidStride(self.name.clone()));
        }
        let convert = |index: Option<u64>, default: u64| -> Result<u64, SlabError> {
            let index = match index {
                None => return Ok(default),
                Some(index) if fortran => index
                    .checked_sub(1)
                    .ok_or_else(|| SlabError::InvalidIndex(self.name.clone()))?,
                Some(index) => index,
            };
            Ok(index.min(size - 1))
        };
        let start = convert(self.start, 0)?;
        let end = convert(self.end, size - 1)?;
        Ok((start, end, stride))
    }
}

impl fmt::Display for RangeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let index = |index: Option<u64>| index.map(|index| index.to_string()).unwrap_or_default();
        write!(
            f,
            "{},{},{},{}",
            self.name,
            index(self.start),
            index(self.end),
            index(self.stride)
        )
    }
}

impl FromStr for RangeSpec {
    type Err = SlabError;

    fn from_str(range: &str) -> Result<Self, Self::Err> {
        Self::parse(range)
    }
}
