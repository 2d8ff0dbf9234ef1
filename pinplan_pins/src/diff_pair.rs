// Copyright 2026 the Pinplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Differential-pair resolution.
//!
//! Pins may carry an explicit [`DiffPairLink`](crate::DiffPairLink), but the
//! link is only a cached hint. [`NamingResolver`] trusts it only when the
//! partner links back with the opposite polarity and sits in the same bank;
//! otherwise it falls back to vendor naming conventions.

use alloc::string::String;

use crate::{Package, Pin, Polarity};

/// Resolves differential partners.
pub trait DiffPairResolver {
    /// Returns the partner leg of `pin`, if it has one in `package`.
    fn find_partner<'a>(&self, pin: &Pin, package: &'a Package) -> Option<&'a Pin>;

    /// Polarity of `pin` within `package`, if it is a differential leg.
    fn polarity_of(&self, pin: &Pin, package: &Package) -> Option<Polarity>;

    /// Whether `pin` is a differential leg within `package`.
    fn is_differential_leg(&self, pin: &Pin, package: &Package) -> bool {
        self.polarity_of(pin, package).is_some()
    }
}

/// Resolver validating explicit links and falling back to naming conventions.
///
/// Recognized conventions, applied to the pin's function name and then to its
/// signal name:
/// - an `L<n>P` / `L<n>N` token between underscores (`IO_L3P_T0_34`),
/// - a trailing `_P` / `_N` (also lowercase),
/// - a trailing `+` / `-`.
#[derive(Clone, Copy, Debug, Default)]
pub struct NamingResolver;

impl NamingResolver {
    fn linked_partner<'a>(pin: &Pin, package: &'a Package) -> Option<&'a Pin> {
        let link = pin.diff_pair.as_ref()?;
        let partner = package.find_by_id(&link.partner)?;
        let back = partner.diff_pair.as_ref()?;
        (back.partner == pin.id
            && back.polarity == link.polarity.opposite()
            && partner.bank == pin.bank)
            .then_some(partner)
    }

    fn named_partner<'a>(pin: &Pin, package: &'a Package) -> Option<&'a Pin> {
        let index = package.index();
        if let Some((_, counterpart)) = split_polarity(&pin.function) {
            let found = index
                .find_by_function(&counterpart)
                .and_then(|s| package.pin(s))
                .filter(|p| p.bank == pin.bank);
            if found.is_some() {
                return found;
            }
        }
        let (_, counterpart) = split_polarity(pin.signal())?;
        index
            .find_by_signal_name(&counterpart)
            .iter()
            .filter_map(|&s| package.pin(s))
            .find(|p| p.bank == pin.bank && p.id != pin.id)
    }
}

impl DiffPairResolver for NamingResolver {
    fn find_partner<'a>(&self, pin: &Pin, package: &'a Package) -> Option<&'a Pin> {
        Self::linked_partner(pin, package).or_else(|| Self::named_partner(pin, package))
    }

    fn polarity_of(&self, pin: &Pin, package: &Package) -> Option<Polarity> {
        if let Some(link) = &pin.diff_pair
            && Self::linked_partner(pin, package).is_some()
        {
            return Some(link.polarity);
        }
        split_polarity(&pin.function)
            .or_else(|| split_polarity(pin.signal()))
            .map(|(p, _)| p)
    }
}

/// Splits a differential name into its polarity and its partner's name.
///
/// Returns `None` for names following no known convention.
#[must_use]
pub fn split_polarity(name: &str) -> Option<(Polarity, String)> {
    if name.is_empty() {
        return None;
    }

    // `L<n>P` / `L<n>N` token, as in `IO_L12N_T1_MRCC_34`.
    let mut offset = 0;
    for token in name.split('_') {
        if let Some(polarity) = lane_token_polarity(token) {
            let flip_at = offset + token.len() - 1;
            let mut partner = String::from(name);
            partner.replace_range(flip_at..=flip_at, flip_letter(polarity));
            return Some((polarity, partner));
        }
        offset += token.len() + 1;
    }

    let suffix_rules: [(&str, Polarity, &str); 6] = [
        ("_P", Polarity::Positive, "_N"),
        ("_N", Polarity::Negative, "_P"),
        ("_p", Polarity::Positive, "_n"),
        ("_n", Polarity::Negative, "_p"),
        ("+", Polarity::Positive, "-"),
        ("-", Polarity::Negative, "+"),
    ];
    for (suffix, polarity, other) in suffix_rules {
        if let Some(stem) = name.strip_suffix(suffix)
            && !stem.is_empty()
        {
            let mut partner = String::from(stem);
            partner.push_str(other);
            return Some((polarity, partner));
        }
    }
    None
}

fn lane_token_polarity(token: &str) -> Option<Polarity> {
    let rest = token.strip_prefix('L')?;
    let (digits, last) = rest.split_at(rest.len().checked_sub(1)?);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    match last {
        "P" => Some(Polarity::Positive),
        "N" => Some(Polarity::Negative),
        _ => None,
    }
}

fn flip_letter(polarity: Polarity) -> &'static str {
    match polarity {
        Polarity::Positive => "N",
        Polarity::Negative => "P",
    }
}
