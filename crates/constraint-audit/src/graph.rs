//! Structural checks that read the document's topology rather than its
//! numbers: closed-loop extraction over non-construction geometry, and
//! equal-radius equivalence classes over the constraint graph.

use std::collections::{BTreeMap, BTreeSet};

use pad_types::{ClosedLoop, SketchConstraint, SketchDocument, SketchEntity};

/// Walk the non-construction lines and arcs of `doc` and return every
/// closed loop found. A loop only counts when each junction along it has
/// exactly two incident curve ends; dangling chains are ignored.
///
/// Each loop starts at its lowest entity id and runs counter-clockwise.
pub fn extract_loops(doc: &SketchDocument) -> Vec<ClosedLoop> {
    let mut ends: BTreeMap<u32, (u32, u32)> = BTreeMap::new();
    for entity in &doc.entities {
        match entity {
            SketchEntity::Line {
                id,
                start_id,
                end_id,
                construction,
            }
            | SketchEntity::Arc {
                id,
                start_id,
                end_id,
                construction,
                ..
            } if !construction => {
                ends.insert(*id, (*start_id, *end_id));
            }
            _ => {}
        }
    }

    let mut incident: BTreeMap<u32, Vec<u32>> = BTreeMap::new();
    for (id, (a, b)) in &ends {
        incident.entry(*a).or_default().push(*id);
        incident.entry(*b).or_default().push(*id);
    }

    let mut visited: BTreeSet<u32> = BTreeSet::new();
    let mut loops = Vec::new();
    'starts: for (&first, &(origin, second)) in &ends {
        if visited.contains(&first) {
            continue;
        }
        let mut chain = vec![first];
        let mut junctions = vec![origin];
        let mut at = second;
        while at != origin {
            junctions.push(at);
            let candidates = match incident.get(&at) {
                Some(c) if c.len() == 2 => c,
                _ => continue 'starts,
            };
            let current = chain[chain.len() - 1];
            let next = if candidates[0] == current {
                candidates[1]
            } else {
                candidates[0]
            };
            if chain.contains(&next) {
                continue 'starts;
            }
            chain.push(next);
            let (na, nb) = ends[&next];
            at = if na == at { nb } else { na };
        }
        if incident[&origin].len() != 2 {
            continue;
        }
        visited.extend(chain.iter().copied());

        if signed_area(doc, &junctions) < 0.0 {
            chain.reverse();
        }
        if let Some(pos) = chain.iter().enumerate().min_by_key(|(_, id)| **id) {
            let lead = pos.0;
            chain.rotate_left(lead);
        }
        loops.push(ClosedLoop {
            entity_ids: chain,
            is_outer: true,
        });
    }
    loops
}

/// Shoelace area of the junction polygon. Arc bulge is ignored; the
/// junction polygon alone decides winding for the shapes audited here.
fn signed_area(doc: &SketchDocument, junctions: &[u32]) -> f64 {
    let mut area = 0.0;
    for i in 0..junctions.len() {
        let a = doc.point_position(junctions[i]);
        let b = doc.point_position(junctions[(i + 1) % junctions.len()]);
        if let (Some(a), Some(b)) = (a, b) {
            area += a.x * b.y - b.x * a.y;
        }
    }
    area / 2.0
}

/// Partition every arc in `doc` into equivalence classes under the
/// equal-radius constraints. Arcs no constraint touches come back as
/// singleton classes. Classes and their members are sorted ascending.
pub fn equal_radius_classes(doc: &SketchDocument) -> Vec<Vec<u32>> {
    let mut parent: BTreeMap<u32, u32> = BTreeMap::new();
    for entity in &doc.entities {
        if let SketchEntity::Arc { id, .. } = entity {
            parent.insert(*id, *id);
        }
    }

    fn find(parent: &BTreeMap<u32, u32>, mut x: u32) -> u32 {
        while parent[&x] != x {
            x = parent[&x];
        }
        x
    }

    for constraint in &doc.constraints {
        if let SketchConstraint::EqualRadius { arc_a, arc_b } = constraint {
            if parent.contains_key(arc_a) && parent.contains_key(arc_b) {
                let ra = find(&parent, *arc_a);
                let rb = find(&parent, *arc_b);
                if ra != rb {
                    parent.insert(ra.max(rb), ra.min(rb));
                }
            }
        }
    }

    let mut classes: BTreeMap<u32, Vec<u32>> = BTreeMap::new();
    let ids: Vec<u32> = parent.keys().copied().collect();
    for id in ids {
        let root = find(&parent, id);
        classes.entry(root).or_default().push(id);
    }
    classes.into_values().collect()
}
