// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! Boolean overlay of polygon sets.
//!
//! Every result is re-oriented with [`Direction::Default`] (exterior rings
//! counter-clockwise, holes clockwise) and stripped of parts whose area is
//! within tolerance of zero, so slivers from round-off never leave the kernel.

use crate::float_types::{Real, Tolerance};
use geo::{Area, BooleanOps, MultiPolygon, Orient, orient::Direction};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Drop parts whose area is indistinguishable from zero.
pub fn drop_slivers(mpoly: MultiPolygon<Real>, tol: &Tolerance) -> MultiPolygon<Real> {
    MultiPolygon(
        mpoly
            .0
            .into_iter()
            .filter(|p| !tol.is_zero_area(p.unsigned_area()))
            .collect(),
    )
}

fn normalize(mpoly: MultiPolygon<Real>, tol: &Tolerance) -> MultiPolygon<Real> {
    drop_slivers(mpoly.orient(Direction::Default), tol)
}

/// Region covered by `a` or `b`.
pub fn union(a: &MultiPolygon<Real>, b: &MultiPolygon<Real>, tol: &Tolerance) -> MultiPolygon<Real> {
    if a.0.is_empty() {
        return normalize(b.clone(), tol);
    }
    if b.0.is_empty() {
        return normalize(a.clone(), tol);
    }
    normalize(a.union(b), tol)
}

/// Region in `a` not in `b`.  May be empty or multi-part.
pub fn difference(
    a: &MultiPolygon<Real>,
    b: &MultiPolygon<Real>,
    tol: &Tolerance,
) -> MultiPolygon<Real> {
    if a.0.is_empty() || b.0.is_empty() {
        return normalize(a.clone(), tol);
    }
    normalize(a.difference(b), tol)
}

/// Area of the region covered by both `a` and `b`.
pub fn intersection_area(a: &MultiPolygon<Real>, b: &MultiPolygon<Real>) -> Real {
    if a.0.is_empty() || b.0.is_empty() {
        return 0.0;
    }
    a.intersection(b).unsigned_area()
}

/// Merge all input polygons into their union, collapsing shared boundaries.
///
/// The inputs are reduced pairwise, level by level, so the same pairs are
/// unioned in the same order whether or not the `parallel` feature is on.
pub fn dissolve_union(polygons: &[MultiPolygon<Real>], tol: &Tolerance) -> MultiPolygon<Real> {
    let mut level: Vec<MultiPolygon<Real>> = polygons
        .iter()
        .filter(|p| !p.0.is_empty())
        .cloned()
        .collect();

    while level.len() > 1 {
        level = reduce_level(&level, tol);
    }

    match level.pop() {
        Some(only) => normalize(only, tol),
        None => MultiPolygon(Vec::new()),
    }
}

#[cfg(not(feature = "parallel"))]
fn reduce_level(level: &[MultiPolygon<Real>], tol: &Tolerance) -> Vec<MultiPolygon<Real>> {
    level.chunks(2).map(|pair| union_pair(pair, tol)).collect()
}

#[cfg(feature = "parallel")]
fn reduce_level(level: &[MultiPolygon<Real>], tol: &Tolerance) -> Vec<MultiPolygon<Real>> {
    level.par_chunks(2).map(|pair| union_pair(pair, tol)).collect()
}

fn union_pair(pair: &[MultiPolygon<Real>], tol: &Tolerance) -> MultiPolygon<Real> {
    match pair {
        [a, b] => union(a, b, tol),
        [a] => a.clone(),
        _ => MultiPolygon(Vec::new()),
    }
}

// End of File
