use crate::engine::errors::WireError;

/// Variable-length byte strings: one shared data buffer plus half-open
/// `[start, end)` ranges per row. Ranges may overlap and need not be
/// monotonic, so several rows can share the same bytes.
#[derive(Debug, Clone, Default)]
pub struct StringColumn {
    data: Vec<u8>,
    starts: Vec<u32>,
    ends: Vec<u32>,
}

impl StringColumn {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(rows: usize, data_bytes: usize) -> Self {
        Self {
            data: Vec::with_capacity(data_bytes),
            starts: Vec::with_capacity(rows),
            ends: Vec::with_capacity(rows),
        }
    }

    /// Builds from raw buffers, checking `start <= end <= data.len()` for every row.
    pub fn from_parts(data: Vec<u8>, starts: Vec<u32>, ends: Vec<u32>) -> Result<Self, WireError> {
        Self::validate(&data, &starts, &ends, 0)?;
        Ok(Self { data, starts, ends })
    }

    pub(crate) fn validate(
        data: &[u8],
        starts: &[u32],
        ends: &[u32],
        column: usize,
    ) -> Result<(), WireError> {
        if data.len() > u32::MAX as usize {
            return Err(WireError::malformed(
                column,
                format!("string data of {} bytes exceeds u32 offsets", data.len()),
            ));
        }
        if starts.len() != ends.len() {
            return Err(WireError::malformed(
                column,
                format!(
                    "{} start offsets but {} end offsets",
                    starts.len(),
                    ends.len()
                ),
            ));
        }
        let data_len = data.len() as u64;
        for (row, (&start, &end)) in starts.iter().zip(ends).enumerate() {
            if start > end {
                return Err(WireError::malformed(
                    column,
                    format!("row {row}: start {start} > end {end}"),
                ));
            }
            if end as u64 > data_len {
                return Err(WireError::malformed(
                    column,
                    format!("row {row}: end {end} exceeds data length {data_len}"),
                ));
            }
        }
        Ok(())
    }

    pub(crate) fn from_parts_unchecked(data: Vec<u8>, starts: Vec<u32>, ends: Vec<u32>) -> Self {
        Self { data, starts, ends }
    }

    pub(crate) fn push(&mut self, value: &[u8]) -> Result<(), WireError> {
        let start = self.data.len();
        let end = start + value.len();
        if end > u32::MAX as usize {
            return Err(WireError::schema(format!(
                "string column data would grow to {end} bytes, beyond u32 offsets"
            )));
        }
        self.data.extend_from_slice(value);
        self.starts.push(start as u32);
        self.ends.push(end as u32);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    /// Slices the data buffer for `index`; nothing is cached per row.
    pub fn get(&self, index: usize) -> Option<&[u8]> {
        let start = *self.starts.get(index)? as usize;
        let end = *self.ends.get(index)? as usize;
        self.data.get(start..end)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn starts(&self) -> &[u32] {
        &self.starts
    }

    pub fn ends(&self) -> &[u32] {
        &self.ends
    }

    pub fn iter(&self) -> impl Iterator<Item = &[u8]> + '_ {
        (0..self.len()).filter_map(move |i| self.get(i))
    }
}

/// Element-wise: two columns holding the same strings are equal even when
/// their buffers share bytes differently.
impl PartialEq for StringColumn {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}
