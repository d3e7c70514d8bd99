use itertools::Itertools;

use crate::config::Config;

use super::{IterationPlan, RangeSpec, RecordSlabPolicy, SlabError, SlabRun};

/// A normalized, non-wrapped strided index range with an inclusive end.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Slab {
    /// The first index.
    pub start: u64,
    /// The last index that may be visited.
    pub end: u64,
    /// The stride.
    pub stride: u64,
}

impl Slab {
    /// Create a new slab.
    #[must_use]
    pub const fn new(start: u64, end: u64, stride: u64) -> Self {
        Self { start, end, stride }
    }

    /// The number of indices visited, `(end - start) / stride + 1`.
    #[must_use]
    pub const fn count(&self) -> u64 {
        (self.end - self.start) / self.stride + 1
    }

    /// Indicates if the index intervals of two slabs intersect.
    #[must_use]
    pub const fn overlaps(&self, other: &Slab) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

/// All range specifications targeting one dimension or coordinate, and their merged slabs.
///
/// A new range set is *basic*: it covers the whole dimension.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RangeSet {
    size: u64,
    specs: Vec<RangeSpec>,
    slabs: Vec<Slab>,
    wrapped: bool,
    user_order: bool,
    basic: bool,
    overlapping: bool,
    count: u64,
}

impl RangeSet {
    /// Create a new basic range set for a dimension of `size`.
    #[must_use]
    pub fn new(size: u64) -> Self {
        Self {
            size,
            specs: Vec::new(),
            slabs: Self::whole(size),
            wrapped: false,
            user_order: false,
            basic: true,
            overlapping: false,
            count: size,
        }
    }

    fn whole(size: u64) -> Vec<Slab> {
        if size == 0 {
            Vec::new()
        } else {
            vec![Slab::new(0, size - 1, 1)]
        }
    }

    /// Append a range specification.
    ///
    /// The specification takes effect on the next [`merge`](RangeSet::merge).
    pub fn push(&mut self, spec: RangeSpec) {
        self.specs.push(spec);
    }

    /// The dimension size.
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// The range specifications in the order supplied.
    #[must_use]
    pub fn specs(&self) -> &[RangeSpec] {
        &self.specs
    }

    /// The merged slabs in iteration order.
    #[must_use]
    pub fn slabs(&self) -> &[Slab] {
        &self.slabs
    }

    /// Indicates if any range specification wrapped past the end of the dimension.
    #[must_use]
    pub const fn is_wrapped(&self) -> bool {
        self.wrapped
    }

    /// Indicates if the slabs are iterated in the order supplied.
    #[must_use]
    pub const fn is_user_order(&self) -> bool {
        self.user_order
    }

    /// Indicates if the range set covers the whole dimension without any range specification.
    #[must_use]
    pub const fn is_basic(&self) -> bool {
        self.basic
    }

    /// Indicates if the index intervals of any two sorted slabs intersect.
    #[must_use]
    pub const fn is_overlapping(&self) -> bool {
        self.overlapping
    }

    /// The total number of indices visited. Repeated indices are counted each time.
    #[must_use]
    pub const fn count(&self) -> u64 {
        self.count
    }

    /// Merge the range specifications into the final ordered slabs.
    ///
    /// - Without specifications, the whole dimension is used.
    /// - Under [`RecordSlabPolicy::FirstOnly`], a record dimension honors only its first specification.
    /// - A wrapped specification (start after end) is split into `[start, size - 1]` and a second piece from the index continuing the stride past the end of the dimension up to `end`.
    ///   Wrapped sets keep the order supplied and are not checked for overlap.
    /// - Otherwise, multiple specifications are sorted by start then end, unless [user order](Config::preserve_user_order) is preserved, and checked for overlap.
    ///   Overlap is reported, not rejected.
    ///
    /// Merging is idempotent.
    ///
    /// # Errors
    /// Returns a [`SlabError`] if a specification cannot be normalized against the dimension size.
    pub fn merge(&mut self, is_record: bool, config: &Config) -> Result<(), SlabError> {
        self.wrapped = false;
        self.user_order = false;
        self.overlapping = false;
        if self.specs.is_empty() {
            self.basic = true;
            self.slabs = Self::whole(self.size);
            self.count = self.size;
            return Ok(());
        }
        self.basic = false;

        let honored = if is_record && config.record_slab_policy() == RecordSlabPolicy::FirstOnly {
            if self.specs.len() > 1 {
                tracing::debug!(
                    "record dimension {} honors only its first of {} ranges",
                    self.specs[0].name(),
                    self.specs.len()
                );
            }
            &self.specs[..1]
        } else {
            &self.specs[..]
        };

        let normalized = honored
            .iter()
            .map(|spec| spec.normalize(self.size, config.fortran_index_convention()))
            .collect::<Result<Vec<_>, _>>()?;

        if normalized.iter().any(|(start, end, _)| start > end) {
            self.wrapped = true;
            self.slabs = normalized
                .into_iter()
                .flat_map(|(start, end, stride)| Self::split_wrapped(self.size, start, end, stride))
                .collect();
        } else {
            let mut slabs: Vec<Slab> = normalized
                .into_iter()
                .map(|(start, end, stride)| Slab::new(start, end, stride))
                .collect();
            if slabs.len() > 1 {
                if config.preserve_user_order() {
                    self.user_order = true;
                } else {
                    slabs.sort_by_key(|slab| (slab.start, slab.end));
                    self.overlapping = slabs
                        .iter()
                        .tuple_combinations()
                        .any(|(first, second)| first.overlaps(second));
                    if self.overlapping {
                        tracing::info!(
                            "ranges on {} overlap, repeated indices are visited once per range",
                            self.specs[0].name()
                        );
                    }
                }
            }
            self.slabs = slabs;
        }
        self.count = self.slabs.iter().map(Slab::count).sum();
        Ok(())
    }

    fn split_wrapped(size: u64, start: u64, end: u64, stride: u64) -> Vec<Slab> {
        if start <= end {
            return vec![Slab::new(start, end, stride)];
        }
        let first = Slab::new(start, size - 1, stride);
        let second_start = first
            .count()
            .checked_mul(stride)
            .and_then(|step| step.checked_add(start))
            .map(|next| next - size);
        match second_start {
            Some(second_start) if second_start <= end => {
                vec![first, Slab::new(second_start, end, stride)]
            }
            _ => vec![first],
        }
    }

    /// Return the iteration plan of the merged slabs.
    #[must_use]
    pub fn plan(&self) -> IterationPlan {
        IterationPlan::new(
            self.slabs
                .iter()
                .map(|slab| SlabRun::new(slab.start, slab.count(), slab.stride))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn merged(size: u64, specs: &[&str], is_record: bool, config: &Config) -> RangeSet {
        let mut range_set = RangeSet::new(size);
        for spec in specs {
            range_set.push(RangeSpec::parse(spec).unwrap());
        }
        range_set.merge(is_record, config).unwrap();
        range_set
    }

    #[test]
    fn range_set_basic() {
        let range_set = merged(10, &[], false, &Config::default());
        assert!(range_set.is_basic());
        assert_eq!(range_set.count(), 10);
        assert_eq!(range_set.slabs(), [Slab::new(0, 9, 1)]);
        assert_eq!(RangeSet::new(0).count(), 0);
        assert!(RangeSet::new(0).slabs().is_empty());
    }

    #[test]
    fn range_set_single() {
        let range_set = merged(10, &["time,1,7,3"], false, &Config::default());
        assert!(!range_set.is_basic());
        assert_eq!(range_set.count(), 3);
        assert_eq!(range_set.plan().indices().collect::<Vec<_>>(), vec![1, 4, 7]);
    }

    #[test]
    fn range_set_wrapped() {
        let range_set = merged(10, &["time,8,2"], false, &Config::default());
        assert!(range_set.is_wrapped());
        assert_eq!(range_set.slabs(), [Slab::new(8, 9, 1), Slab::new(0, 2, 1)]);
        assert_eq!(range_set.count(), 5);
        assert_eq!(
            range_set.plan().indices().collect::<Vec<_>>(),
            vec![8, 9, 0, 1, 2]
        );
    }

    #[test]
    fn range_set_wrapped_stride() {
        // 7, 9, then 11 - 10 = 1, 3
        let range_set = merged(10, &["time,7,3,2"], false, &Config::default());
        assert_eq!(range_set.slabs(), [Slab::new(7, 9, 2), Slab::new(1, 3, 2)]);
        assert_eq!(range_set.count(), 4);
        // 8, then 12 - 10 = 2 lies beyond the end index 1
        let range_set = merged(10, &["time,8,1,4"], false, &Config::default());
        assert_eq!(range_set.slabs(), [Slab::new(8, 9, 4)]);
        assert_eq!(range_set.count(), 1);
    }

    #[test]
    fn range_set_wrapped_stride_beyond_index_space() {
        let range_set = merged(10, &["time,8,2,18446744073709551615"], false, &Config::default());
        assert!(range_set.is_wrapped());
        assert_eq!(range_set.slabs(), [Slab::new(8, 9, u64::MAX)]);
        assert_eq!(range_set.count(), 1);
        assert_eq!(range_set.plan().indices().collect::<Vec<_>>(), vec![8]);
    }

    #[test]
    fn range_set_wrapped_keeps_order() {
        let range_set = merged(10, &["time,5,6", "time,8,2"], false, &Config::default());
        assert!(range_set.is_wrapped());
        assert!(!range_set.is_overlapping());
        assert_eq!(
            range_set.slabs(),
            [Slab::new(5, 6, 1), Slab::new(8, 9, 1), Slab::new(0, 2, 1)]
        );
        assert_eq!(range_set.count(), 7);
    }

    #[test]
    fn range_set_sorted_overlap() {
        let range_set = merged(10, &["time,6,8", "time,0,2", "time,1,3"], false, &Config::default());
        assert_eq!(
            range_set.slabs(),
            [Slab::new(0, 2, 1), Slab::new(1, 3, 1), Slab::new(6, 8, 1)]
        );
        assert!(range_set.is_overlapping());
        assert_eq!(range_set.count(), 9);
    }

    #[test]
    fn range_set_user_order() {
        let mut config = Config::default();
        config.set_preserve_user_order(true);
        let range_set = merged(10, &["time,6,8", "time,0,2"], false, &config);
        assert!(range_set.is_user_order());
        assert_eq!(range_set.slabs(), [Slab::new(6, 8, 1), Slab::new(0, 2, 1)]);
    }

    #[test]
    fn range_set_record_first_only() {
        let mut config = Config::default();
        config.set_record_slab_policy(RecordSlabPolicy::FirstOnly);
        let range_set = merged(10, &["time,6,8", "time,0,2"], true, &config);
        assert_eq!(range_set.slabs(), [Slab::new(6, 8, 1)]);
        assert_eq!(range_set.count(), 3);
        assert_eq!(range_set.specs().len(), 2);
        let range_set = merged(10, &["time,6,8", "time,0,2"], false, &config);
        assert_eq!(range_set.count(), 6);
    }

    #[test]
    fn range_set_merge_idempotent() {
        let config = Config::default();
        let mut range_set = merged(10, &["time,6,8", "time,0,2"], false, &config);
        let before = range_set.clone();
        range_set.merge(false, &config).unwrap();
        assert_eq!(range_set, before);
    }
}
