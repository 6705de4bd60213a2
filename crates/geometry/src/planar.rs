// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! Half-edge planar graph shared by noding, pruning and polygonization.
//!
//! Edge `k` is stored as the two half-edges `2k` (u -> v) and `2k + 1`
//! (v -> u), so the twin of `h` is `h ^ 1`.  Outgoing half-edges are sorted
//! counter-clockwise around each vertex and `next(h)` is the outgoing edge
//! just clockwise of `twin(h)`, which keeps the traced face on the left.

use crate::float_types::{Real, Tolerance};
use geo::{Coord, Line, LineString};
use hashbrown::HashMap;

/// Snaps coordinates that lie within tolerance of each other onto one vertex.
pub(crate) struct VertexIndex {
    tol: Tolerance,
    cell: Real,
    cells: HashMap<(i64, i64), Vec<usize>>,
    coords: Vec<Coord<Real>>,
}

impl VertexIndex {
    pub(crate) fn new(tol: &Tolerance) -> Self {
        Self {
            tol: *tol,
            cell: tol.cell_size(),
            cells: HashMap::new(),
            coords: Vec::new(),
        }
    }

    fn key(&self, c: Coord<Real>) -> (i64, i64) {
        ((c.x / self.cell).floor() as i64, (c.y / self.cell).floor() as i64)
    }

    /// Id of the vertex at `c`, creating one when no vertex is close enough.
    /// The lowest matching id wins so results do not depend on hashing.
    pub(crate) fn insert(&mut self, c: Coord<Real>) -> usize {
        let (kx, ky) = self.key(c);
        let mut found: Option<usize> = None;
        for dx in -1..=1 {
            for dy in -1..=1 {
                if let Some(ids) = self.cells.get(&(kx + dx, ky + dy)) {
                    for &id in ids {
                        if self.tol.coincident(self.coords[id], c) {
                            found = Some(found.map_or(id, |best| best.min(id)));
                        }
                    }
                }
            }
        }
        if let Some(id) = found {
            return id;
        }

        let id = self.coords.len();
        self.coords.push(c);
        self.cells.entry((kx, ky)).or_default().push(id);
        id
    }

    pub(crate) fn coord(&self, id: usize) -> Coord<Real> {
        self.coords[id]
    }

    pub(crate) fn into_coords(self) -> Vec<Coord<Real>> {
        self.coords
    }
}

/// Snap line endpoints into a vertex index and return the distinct undirected
/// edges, ordered by vertex ids.  Edges collapsing to a single vertex vanish.
pub(crate) fn snap_edges(lines: &[Line<Real>], tol: &Tolerance) -> (Vec<Coord<Real>>, Vec<(usize, usize)>) {
    let mut index = VertexIndex::new(tol);
    let mut edges: Vec<(usize, usize)> = lines
        .iter()
        .map(|l| (index.insert(l.start), index.insert(l.end)))
        .filter(|(u, v)| u != v)
        .map(|(u, v)| (u.min(v), u.max(v)))
        .collect();
    edges.sort_unstable();
    edges.dedup();
    (index.into_coords(), edges)
}

/// A closed walk of half-edges with the face on its left.
pub(crate) struct Face {
    pub(crate) half_edges: Vec<usize>,
    /// Positive for bounded faces, negative for the outer boundary of a
    /// connected component.
    pub(crate) signed_area: Real,
}

pub(crate) struct PlanarGraph {
    coords: Vec<Coord<Real>>,
    origin: Vec<usize>,
    face_of: Vec<usize>,
    faces: Vec<Face>,
}

impl PlanarGraph {
    /// Build the graph and trace all of its faces.  `edges` must be distinct,
    /// non-degenerate and meet only at shared vertices.
    pub(crate) fn build(coords: Vec<Coord<Real>>, edges: &[(usize, usize)]) -> Self {
        let origin: Vec<usize> = edges.iter().flat_map(|&(u, v)| [u, v]).collect();
        let count = origin.len();

        let angle = |h: usize| {
            let a = coords[origin[h]];
            let b = coords[origin[h ^ 1]];
            (b.y - a.y).atan2(b.x - a.x)
        };

        let mut outgoing: Vec<Vec<usize>> = vec![Vec::new(); coords.len()];
        for (h, &o) in origin.iter().enumerate() {
            outgoing[o].push(h);
        }
        let mut position = vec![0; count];
        for around in &mut outgoing {
            around.sort_by(|&a, &b| angle(a).total_cmp(&angle(b)).then(a.cmp(&b)));
            for (i, &h) in around.iter().enumerate() {
                position[h] = i;
            }
        }

        let next: Vec<usize> = (0..count)
            .map(|h| {
                let twin = h ^ 1;
                let around = &outgoing[origin[twin]];
                around[(position[twin] + around.len() - 1) % around.len()]
            })
            .collect();

        // `next` is a permutation, so every half-edge lies on exactly one cycle.
        let mut face_of = vec![usize::MAX; count];
        let mut faces = Vec::new();
        for start in 0..count {
            if face_of[start] != usize::MAX {
                continue;
            }
            let id = faces.len();
            let mut half_edges = Vec::new();
            let mut twice_area = 0.0;
            let mut h = start;
            loop {
                face_of[h] = id;
                half_edges.push(h);
                let a = coords[origin[h]];
                let b = coords[origin[h ^ 1]];
                twice_area += a.x * b.y - b.x * a.y;
                h = next[h];
                if h == start {
                    break;
                }
            }
            faces.push(Face {
                half_edges,
                signed_area: twice_area * 0.5,
            });
        }

        Self {
            coords,
            origin,
            face_of,
            faces,
        }
    }

    pub(crate) fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub(crate) fn origin_coord(&self, h: usize) -> Coord<Real> {
        self.coords[self.origin[h]]
    }

    pub(crate) fn edge_count(&self) -> usize {
        self.origin.len() / 2
    }

    pub(crate) fn edge_line(&self, edge: usize) -> Line<Real> {
        Line::new(self.origin_coord(2 * edge), self.origin_coord(2 * edge + 1))
    }

    /// An edge with the same face on both sides is a dangle or a bridge: it
    /// bounds no area.
    pub(crate) fn is_cut_edge(&self, edge: usize) -> bool {
        self.face_of[2 * edge] == self.face_of[2 * edge + 1]
    }

    /// The closed ring traced by a face.
    pub(crate) fn ring(&self, face: &Face) -> LineString<Real> {
        let mut coords: Vec<Coord<Real>> = face
            .half_edges
            .iter()
            .map(|&h| self.origin_coord(h))
            .collect();
        if let Some(&first) = coords.first() {
            coords.push(first);
        }
        LineString::new(coords)
    }

    /// Connected-component label of the vertex a half-edge leaves from.
    pub(crate) fn components(&self) -> Vec<usize> {
        let mut parent: Vec<usize> = (0..self.coords.len()).collect();
        fn find(parent: &mut [usize], mut v: usize) -> usize {
            while parent[v] != v {
                parent[v] = parent[parent[v]];
                v = parent[v];
            }
            v
        }
        for edge in 0..self.edge_count() {
            let a = find(&mut parent, self.origin[2 * edge]);
            let b = find(&mut parent, self.origin[2 * edge + 1]);
            if a != b {
                parent[a.max(b)] = a.min(b);
            }
        }
        self.origin.iter().map(|&v| find(&mut parent, v)).collect()
    }
}


// End of File
