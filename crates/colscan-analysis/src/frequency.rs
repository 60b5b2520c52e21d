/// Occurrence count for each of the 256 byte values.
///
/// Values never observed count as zero and still take part in any statistic
/// computed over the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; 256],
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self { counts: [0; 256] }
    }
}

impl FrequencyTable {
    #[must_use]
    pub fn count(&self, byte: u8) -> u64 {
        self.counts[usize::from(byte)]
    }

    /// All 256 counters, indexed by byte value.
    #[must_use]
    pub fn counts(&self) -> &[u64; 256] {
        &self.counts
    }

    /// Sum of all counters; equals the number of entries counted.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Number of byte values seen at least once.
    #[must_use]
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    pub fn add(&mut self, byte: u8) {
        self.counts[usize::from(byte)] += 1;
    }
}

impl Extend<u8> for FrequencyTable {
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = u8>,
    {
        for byte in iter {
            self.add(byte);
        }
    }
}

impl FromIterator<u8> for FrequencyTable {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = u8>,
    {
        let mut table = Self::default();
        table.extend(iter);
        table
    }
}
