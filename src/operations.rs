//! Set algebra over key→resource maps, used to reconcile locales.
//!
//! Both operations walk the two sorted maps once side by side.

use std::{cmp::Ordering, collections::BTreeMap};

/// Keys present in both maps, with values taken from `a`.
pub fn intersect<K, V>(a: &BTreeMap<K, V>, b: &BTreeMap<K, V>) -> BTreeMap<K, V>
where
    K: Ord + Clone,
    V: Clone,
{
    let mut out = BTreeMap::new();
    let mut left = a.iter().peekable();
    let mut right = b.keys().peekable();
    while let (Some((key, value)), Some(other)) = (left.peek(), right.peek()) {
        match key.cmp(other) {
            Ordering::Less => {
                left.next();
            }
            Ordering::Greater => {
                right.next();
            }
            Ordering::Equal => {
                out.insert((*key).clone(), (*value).clone());
                left.next();
                right.next();
            }
        }
    }
    out
}

/// Keys present in exactly one of the maps (symmetric difference), with
/// values taken from whichever side holds them.
pub fn outersect<K, V>(a: &BTreeMap<K, V>, b: &BTreeMap<K, V>) -> BTreeMap<K, V>
where
    K: Ord + Clone,
    V: Clone,
{
    let mut out = BTreeMap::new();
    let mut left = a.iter().peekable();
    let mut right = b.iter().peekable();
    loop {
        match (left.peek(), right.peek()) {
            (Some((lk, lv)), Some((rk, rv))) => match lk.cmp(rk) {
                Ordering::Less => {
                    out.insert((*lk).clone(), (*lv).clone());
                    left.next();
                }
                Ordering::Greater => {
                    out.insert((*rk).clone(), (*rv).clone());
                    right.next();
                }
                Ordering::Equal => {
                    left.next();
                    right.next();
                }
            },
            (Some((lk, lv)), None) => {
                out.insert((*lk).clone(), (*lv).clone());
                left.next();
            }
            (None, Some((rk, rv))) => {
                out.insert((*rk).clone(), (*rv).clone());
                right.next();
            }
            (None, None) => break,
        }
    }
    out
}
