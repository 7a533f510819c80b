use regex::Regex;
use std::sync::LazyLock;

// Anchored at the start but allows a transcript prefix such as "NM_000059.3:".
static HGVS_INTRON_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^.*c\.[0-9]+?([-+])([0-9]+)").expect("HGVS intron pattern is valid")
});

/// Flags coding-HGVS notations that sit deep inside an intron, i.e. further
/// from the exon boundary than the splice-region buffer on that side.
#[derive(Debug, Clone)]
pub struct IntronProximityClassifier {
    donor_max_offset: u64,
    acceptor_max_offset: u64,
}

impl Default for IntronProximityClassifier {
    fn default() -> Self {
        Self::new(6, 20)
    }
}

impl IntronProximityClassifier {
    /// `donor_max_offset` applies to `+` offsets, `acceptor_max_offset` to `-` offsets.
    pub fn new(donor_max_offset: u64, acceptor_max_offset: u64) -> Self {
        Self {
            donor_max_offset,
            acceptor_max_offset,
        }
    }

    pub fn is_deep_intronic(&self, hgvsc: &str) -> bool {
        let Some(caps) = HGVS_INTRON_RE.captures(hgvsc) else {
            return false;
        };
        // Only digits can reach here, so a parse failure means overflow.
        let offset = caps[2].parse::<u64>().unwrap_or(u64::MAX);
        match &caps[1] {
            "+" => offset > self.donor_max_offset,
            "-" => offset > self.acceptor_max_offset,
            _ => false,
        }
    }
}
