use std::cmp::Ordering;

/// Comparison flags of a dependency (`<`, `>`, `=` and combinations)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sense {
    pub less: bool,
    pub greater: bool,
    pub equal: bool,
}

impl Sense {
    /// Parses rpm's `depflags` rendering; `None` for anything else
    pub fn parse(flags: &str) -> Option<Self> {
        let flags = flags.trim();
        if flags.is_empty() {
            return None;
        }

        let mut sense = Sense::default();
        for c in flags.chars() {
            match c {
                '<' => sense.less = true,
                '>' => sense.greater = true,
                '=' => sense.equal = true,
                _ => return None,
            }
        }
        Some(sense)
    }
}

/// `[epoch:]version[-release]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evr {
    epoch: u64,
    version: String,
    release: Option<String>,
}

impl Evr {
    pub fn parse(evr: &str) -> Self {
        let (epoch, rest) = match evr.split_once(':') {
            Some((epoch, rest)) if epoch.chars().all(|c| c.is_ascii_digit()) => {
                (epoch.parse().unwrap_or(0), rest)
            }
            _ => (0, evr),
        };
        let (version, release) = match rest.rsplit_once('-') {
            Some((version, release)) => (version, Some(release.to_string())),
            None => (rest, None),
        };

        Self {
            epoch,
            version: version.to_string(),
            release,
        }
    }

    /// Releases only take part when both sides carry one
    fn compare(&self, other: &Evr) -> Ordering {
        self.epoch
            .cmp(&other.epoch)
            .then_with(|| rpmvercmp(&self.version, &other.version))
            .then_with(|| match (&self.release, &other.release) {
                (Some(a), Some(b)) => rpmvercmp(a, b),
                _ => Ordering::Equal,
            })
    }
}

/// A versioned side of a dependency: `name <sense> evr`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    pub sense: Sense,
    pub evr: Evr,
}

impl Constraint {
    pub fn new(flags: &str, version: &str) -> Option<Self> {
        let version = version.trim();
        if version.is_empty() {
            return None;
        }
        Some(Self {
            sense: Sense::parse(flags)?,
            evr: Evr::parse(version),
        })
    }

    /// Whether the ranges of a provide and a requirement overlap
    pub fn overlaps(&self, requirement: &Constraint) -> bool {
        let (p, r) = (self.sense, requirement.sense);
        match self.evr.compare(&requirement.evr) {
            Ordering::Less => p.greater || r.less,
            Ordering::Greater => p.less || r.greater,
            Ordering::Equal => {
                (p.equal && r.equal) || (p.less && r.less) || (p.greater && r.greater)
            }
        }
    }
}

/// rpm's segment-wise version comparison, including `~` (sorts before
/// anything) and `^` (sorts after the base version)
pub fn rpmvercmp(a: &str, b: &str) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }

    let (a, b) = (a.as_bytes(), b.as_bytes());
    let (mut i, mut j) = (0, 0);

    loop {
        while i < a.len() && !a[i].is_ascii_alphanumeric() && a[i] != b'~' && a[i] != b'^' {
            i += 1;
        }
        while j < b.len() && !b[j].is_ascii_alphanumeric() && b[j] != b'~' && b[j] != b'^' {
            j += 1;
        }

        let (ca, cb) = (a.get(i).copied(), b.get(j).copied());

        if ca == Some(b'~') || cb == Some(b'~') {
            if ca != Some(b'~') {
                return Ordering::Greater;
            }
            if cb != Some(b'~') {
                return Ordering::Less;
            }
            i += 1;
            j += 1;
            continue;
        }

        if ca == Some(b'^') || cb == Some(b'^') {
            if ca.is_none() {
                return Ordering::Less;
            }
            if cb.is_none() {
                return Ordering::Greater;
            }
            if ca != Some(b'^') {
                return Ordering::Greater;
            }
            if cb != Some(b'^') {
                return Ordering::Less;
            }
            i += 1;
            j += 1;
            continue;
        }

        let (Some(first), Some(_)) = (ca, cb) else {
            break;
        };

        let numeric = first.is_ascii_digit();
        let (seg_a, next_i) = segment(a, i, numeric);
        let (seg_b, next_j) = segment(b, j, numeric);

        // Segments of different type: numbers are newer than letters
        if seg_b.is_empty() {
            return if numeric {
                Ordering::Greater
            } else {
                Ordering::Less
            };
        }

        let order = if numeric {
            let (na, nb) = (trim_zeros(seg_a), trim_zeros(seg_b));
            na.len().cmp(&nb.len()).then_with(|| na.cmp(nb))
        } else {
            seg_a.cmp(seg_b)
        };
        if order != Ordering::Equal {
            return order;
        }

        i = next_i;
        j = next_j;
    }

    match (i < a.len(), j < b.len()) {
        (false, false) => Ordering::Equal,
        (true, _) => Ordering::Greater,
        (false, true) => Ordering::Less,
    }
}

/// The run of digits (or letters) starting at `start`, and where it ends
fn segment(s: &[u8], start: usize, numeric: bool) -> (&[u8], usize) {
    let end = s[start..]
        .iter()
        .position(|c| {
            if numeric {
                !c.is_ascii_digit()
            } else {
                !c.is_ascii_alphabetic()
            }
        })
        .map_or(s.len(), |n| start + n);
    (&s[start..end], end)
}

fn trim_zeros(s: &[u8]) -> &[u8] {
    let zeros = s.iter().take_while(|c| **c == b'0').count();
    &s[zeros..]
}
