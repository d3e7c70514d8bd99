/// A contiguous strided run of indices.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SlabRun {
    /// The first index.
    pub start: u64,
    /// The number of indices.
    pub count: u64,
    /// The stride between indices.
    pub stride: u64,
}

impl SlabRun {
    /// Create a new slab run.
    #[must_use]
    pub const fn new(start: u64, count: u64, stride: u64) -> Self {
        Self {
            start,
            count,
            stride,
        }
    }

    /// Returns an iterator over the indices of the run.
    pub fn indices(&self) -> impl Iterator<Item = u64> {
        let SlabRun {
            start,
            count,
            stride,
        } = *self;
        (0..count).map(move |i| start + i * stride)
    }
}

/// An ordered iteration plan over one dimension.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IterationPlan {
    runs: Vec<SlabRun>,
    length: u64,
}

impl IterationPlan {
    /// Create a new iteration plan from `runs`.
    #[must_use]
    pub fn new(runs: Vec<SlabRun>) -> Self {
        let length = runs.iter().map(|run| run.count).sum();
        Self { runs, length }
    }

    /// The runs in iteration order.
    #[must_use]
    pub fn runs(&self) -> &[SlabRun] {
        &self.runs
    }

    /// The total output length.
    #[must_use]
    pub const fn length(&self) -> u64 {
        self.length
    }

    /// Returns an iterator over every index visited, in order.
    pub fn indices(&self) -> impl Iterator<Item = u64> + '_ {
        self.runs.iter().flat_map(SlabRun::indices)
    }
}
