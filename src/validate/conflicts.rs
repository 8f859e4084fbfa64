use crate::core::specifier::Specifier;
use crate::core::types::Comparator;
use crate::core::version::Version;

/// Whether a set of specifiers can be satisfied by any version at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Satisfiability {
    Satisfiable,
    /// Human-readable description of the contradiction.
    Conflict(String),
}

impl Satisfiability {
    pub fn is_conflict(&self) -> bool {
        matches!(self, Satisfiability::Conflict(_))
    }
}

#[derive(Debug, Clone)]
struct Bound {
    version: Version,
    inclusive: bool,
    source: String,
}

/// Interval form of a specifier list: pins, half-open bounds, point and
/// range exclusions. Wildcards and `~=` reduce to bounds here.
#[derive(Debug, Default)]
struct BoundSet {
    pins: Vec<(Version, String)>,
    lowers: Vec<Bound>,
    uppers: Vec<Bound>,
    excluded_points: Vec<(Version, String)>,
    excluded_ranges: Vec<(Version, Version, String)>,
}

impl BoundSet {
    fn push(&mut self, spec: &Specifier) {
        let source = spec.to_string();
        match spec.op {
            Comparator::Eq if spec.wildcard => {
                self.lowers.push(Bound {
                    version: spec.version.clone(),
                    inclusive: true,
                    source: source.clone(),
                });
                self.uppers.push(Bound {
                    version: spec.version.wildcard_upper_bound(),
                    inclusive: false,
                    source,
                });
            }
            Comparator::Eq => self.pins.push((spec.version.clone(), source)),
            Comparator::Ne if spec.wildcard => self.excluded_ranges.push((
                spec.version.clone(),
                spec.version.wildcard_upper_bound(),
                source,
            )),
            Comparator::Ne => self.excluded_points.push((spec.version.clone(), source)),
            Comparator::Ge => self.lowers.push(Bound {
                version: spec.version.clone(),
                inclusive: true,
                source,
            }),
            Comparator::Gt => self.lowers.push(Bound {
                version: spec.version.clone(),
                inclusive: false,
                source,
            }),
            Comparator::Le => self.uppers.push(Bound {
                version: spec.version.clone(),
                inclusive: true,
                source,
            }),
            Comparator::Lt => self.uppers.push(Bound {
                version: spec.version.clone(),
                inclusive: false,
                source,
            }),
            Comparator::Compatible => {
                self.lowers.push(Bound {
                    version: spec.version.clone(),
                    inclusive: true,
                    source: source.clone(),
                });
                self.uppers.push(Bound {
                    version: spec.version.compatible_upper_bound(),
                    inclusive: false,
                    source,
                });
            }
        }
    }

    /// The tightest lower bound: highest version, exclusive beating
    /// inclusive at the same version.
    fn tightest_lower(&self) -> Option<&Bound> {
        self.lowers.iter().reduce(|best, candidate| {
            match candidate.version.cmp(&best.version) {
                std::cmp::Ordering::Greater => candidate,
                std::cmp::Ordering::Equal if !candidate.inclusive => candidate,
                _ => best,
            }
        })
    }

    fn tightest_upper(&self) -> Option<&Bound> {
        self.uppers.iter().reduce(|best, candidate| {
            match candidate.version.cmp(&best.version) {
                std::cmp::Ordering::Less => candidate,
                std::cmp::Ordering::Equal if !candidate.inclusive => candidate,
                _ => best,
            }
        })
    }
}

/// Analyze a combined specifier list for contradictions. Used both within
/// a single requirement and across duplicate entries of one package.
pub fn analyze<'a, I>(specs: I) -> Satisfiability
where
    I: IntoIterator<Item = &'a Specifier>,
{
    let mut bounds = BoundSet::default();
    for spec in specs {
        bounds.push(spec);
    }

    // Two different pins can never both hold.
    for pair in bounds.pins.windows(2) {
        let (a, a_src) = &pair[0];
        let (b, b_src) = &pair[1];
        if a != b {
            return Satisfiability::Conflict(format!(
                "'{}' and '{}' pin different versions",
                a_src, b_src
            ));
        }
    }

    let lower = bounds.tightest_lower();
    let upper = bounds.tightest_upper();

    // Pins must sit inside every bound and outside every exclusion.
    if let Some((pin, pin_src)) = bounds.pins.first() {
        if let Some(bound) = lower {
            let below = *pin < bound.version || (*pin == bound.version && !bound.inclusive);
            if below {
                return Satisfiability::Conflict(format!(
                    "'{}' is excluded by '{}'",
                    pin_src, bound.source
                ));
            }
        }
        if let Some(bound) = upper {
            let above = *pin > bound.version || (*pin == bound.version && !bound.inclusive);
            if above {
                return Satisfiability::Conflict(format!(
                    "'{}' is excluded by '{}'",
                    pin_src, bound.source
                ));
            }
        }
        for (excluded, ne_src) in &bounds.excluded_points {
            if pin == excluded {
                return Satisfiability::Conflict(format!(
                    "'{}' contradicts '{}'",
                    pin_src, ne_src
                ));
            }
        }
        for (range_lo, range_hi, ne_src) in &bounds.excluded_ranges {
            if pin >= range_lo && pin < range_hi {
                return Satisfiability::Conflict(format!(
                    "'{}' contradicts '{}'",
                    pin_src, ne_src
                ));
            }
        }
    }

    // An empty interval between the tightest bounds.
    if let (Some(lo), Some(hi)) = (lower, upper) {
        let empty = lo.version > hi.version
            || (lo.version == hi.version && !(lo.inclusive && hi.inclusive));
        if empty {
            return Satisfiability::Conflict(format!(
                "'{}' and '{}' leave no versions",
                lo.source, hi.source
            ));
        }
    }

    Satisfiability::Satisfiable
}
