use std::cmp::Ordering;
use std::collections::HashMap;
use std::iter::Peekable;
use std::str::Chars;

use super::data::{ImageRecord, Shoot};

/// All images grouped into shoots, with shoots in name order.
///
/// Built once per record load by [`build_catalog`]; never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    shoots: Vec<Shoot>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Empty catalog, used before the first scan completes
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.shoots.is_empty()
    }

    /// Number of shoots
    pub fn len(&self) -> usize {
        self.shoots.len()
    }

    /// Shoot names in ascending order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.shoots.iter().map(Shoot::name)
    }

    pub fn shoots(&self) -> &[Shoot] {
        &self.shoots
    }

    pub fn shoot(&self, name: &str) -> Option<&Shoot> {
        self.index.get(name).map(|&i| &self.shoots[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// First shoot alphabetically, if any
    pub fn first(&self) -> Option<&Shoot> {
        self.shoots.first()
    }

    /// Total number of images across all shoots
    pub fn image_count(&self) -> usize {
        self.shoots.iter().map(Shoot::len).sum()
    }
}

/// Group a flat list of records into shoots keyed by directory.
///
/// Images inside a shoot are ordered by `path`, shoots by name, both
/// with [`compare_names`].
pub fn build_catalog(records: impl IntoIterator<Item = ImageRecord>) -> Catalog {
    let mut groups: HashMap<String, Vec<ImageRecord>> = HashMap::new();
    for record in records {
        groups.entry(record.directory.clone()).or_default().push(record);
    }

    let mut shoots: Vec<Shoot> = groups
        .into_iter()
        .map(|(name, mut images)| {
            images.sort_by(|a, b| compare_names(&a.path, &b.path));
            Shoot::new(name, images)
        })
        .collect();
    shoots.sort_by(|a, b| compare_names(a.name(), b.name()));

    let index = shoots
        .iter()
        .enumerate()
        .map(|(i, shoot)| (shoot.name().to_string(), i))
        .collect();

    Catalog { shoots, index }
}

/// Compare two names the way people expect them listed.
///
/// Letters compare case-insensitively and runs of digits compare by
/// numeric value, so "img2" sorts before "IMG10". Names equal under those
/// rules fall back to lowercase-first, then to raw order, which keeps the
/// ordering total.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    primary_order(a, b)
        .then_with(|| a.chars().map(invert_case).cmp(b.chars().map(invert_case)))
        .then_with(|| a.cmp(b))
}

fn primary_order(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                let l = take_digits(&mut left);
                let r = take_digits(&mut right);
                let ord = compare_digit_runs(&l, &r);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(x), Some(y)) => {
                let ord = fold_case(x).cmp(&fold_case(y));
                if ord != Ordering::Equal {
                    return ord;
                }
                left.next();
                right.next();
            }
        }
    }
}

fn take_digits(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.next_if(|c| c.is_ascii_digit()) {
        run.push(c);
    }
    run
}

/// Numeric comparison of two digit strings of any length
fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn fold_case(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

fn invert_case(c: char) -> char {
    if c.is_lowercase() {
        c.to_uppercase().next().unwrap_or(c)
    } else if c.is_uppercase() {
        c.to_lowercase().next().unwrap_or(c)
    } else {
        c
    }
}
