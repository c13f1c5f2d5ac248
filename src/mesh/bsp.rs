//! [BSP](https://en.wikipedia.org/wiki/Binary_space_partitioning) tree node structure and operations

use crate::float_types::Real;
use crate::mesh::plane::Plane;
use crate::mesh::polygon::Polygon;

/// A [BSP](https://en.wikipedia.org/wiki/Binary_space_partitioning) tree node,
/// containing polygons plus optional front/back subtrees.
///
/// The tree represents one solid operand: a node's plane partitions space, the
/// node stores the polygons coplanar with that plane, and the subtrees hold
/// everything strictly in front of / behind it. Spanning polygons are split
/// before insertion, so no stored polygon ever straddles a node's plane.
///
/// All traversals use an explicit work stack rather than recursion, keeping
/// deep trees from degenerate input (many near-coplanar polygons) from
/// exhausting the call stack.
#[derive(Debug, Clone)]
pub struct Node<S: Clone> {
    /// Splitting plane for this node *or* **None** for an empty node.
    pub plane: Option<Plane>,

    /// Subtree of polygons strictly in the *front* half‑space.
    pub front: Option<Box<Node<S>>>,

    /// Subtree of polygons strictly in the *back* half‑space.
    pub back: Option<Box<Node<S>>>,

    /// Polygons that lie *exactly* on `plane`
    /// (after the node has been built).
    pub polygons: Vec<Polygon<S>>,
}

impl<S: Clone> Node<S> {
    /// Create a new empty BSP node
    pub const fn new() -> Self {
        Self {
            plane: None,
            front: None,
            back: None,
            polygons: Vec::new(),
        }
    }

    /// Creates a new BSP node from polygons
    pub fn from_polygons(polygons: &[Polygon<S>], eps: Real) -> Self {
        let mut node = Self::new();
        if !polygons.is_empty() {
            node.build(polygons, eps);
        }
        node
    }

    /// Convert solid space to empty space and empty space to solid space:
    /// flip every polygon and plane and swap the front/back subtrees.
    ///
    /// Applying this twice restores the original classification behavior.
    pub fn invert(&mut self) {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            node.polygons.iter_mut().for_each(|p| p.flip());
            if let Some(ref mut plane) = node.plane {
                plane.flip();
            }
            std::mem::swap(&mut node.front, &mut node.back);

            if let Some(ref mut front) = node.front {
                stack.push(front);
            }
            if let Some(ref mut back) = node.back {
                stack.push(back);
            }
        }
    }

    /// Recursively remove all polygons in `polygons` that are inside the
    /// solid represented by this BSP tree.
    ///
    /// Fragments that reach a missing back child are inside the solid and are
    /// discarded; everything else survives. An empty tree passes the input
    /// through unchanged.
    pub fn clip_polygons(&self, polygons: &[Polygon<S>], eps: Real) -> Vec<Polygon<S>> {
        let mut result = Vec::new();
        let mut stack = vec![(self, polygons.to_vec())];

        while let Some((node, polys)) = stack.pop() {
            let Some(plane) = &node.plane else {
                result.extend(polys);
                continue;
            };

            let mut front_polys = Vec::with_capacity(polys.len());
            let mut back_polys = Vec::with_capacity(polys.len());

            for polygon in &polys {
                let (coplanar_front, coplanar_back, mut front_parts, mut back_parts) =
                    plane.split_polygon(polygon, eps);

                front_polys.extend(coplanar_front);
                back_polys.extend(coplanar_back);
                front_polys.append(&mut front_parts);
                back_polys.append(&mut back_parts);
            }

            if let Some(front_node) = &node.front {
                if !front_polys.is_empty() {
                    stack.push((front_node, front_polys));
                }
            } else {
                result.extend(front_polys);
            }

            if let Some(back_node) = &node.back {
                if !back_polys.is_empty() {
                    stack.push((back_node, back_polys));
                }
            }
            // No back child: the back bucket is inside the solid and is dropped.
        }
        result
    }

    /// Remove all polygons in this BSP tree that are inside the other BSP tree
    pub fn clip_to(&mut self, bsp: &Node<S>, eps: Real) {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            node.polygons = bsp.clip_polygons(&node.polygons, eps);
            if let Some(front) = node.front.as_mut() {
                stack.push(front);
            }
            if let Some(back) = node.back.as_mut() {
                stack.push(back);
            }
        }
    }

    /// Return all polygons in this BSP tree using an iterative approach,
    /// avoiding potential stack overflow of recursive approach
    pub fn all_polygons(&self) -> Vec<Polygon<S>> {
        let mut result = Vec::new();
        let mut stack = vec![self];

        while let Some(node) = stack.pop() {
            result.extend_from_slice(&node.polygons);
            stack.extend(
                [&node.front, &node.back]
                    .iter()
                    .filter_map(|child| child.as_ref().map(|boxed| boxed.as_ref())),
            );
        }
        result
    }

    /// Build a BSP tree from the given polygons. When called on an existing
    /// tree, the new polygons are filtered down into the existing subtrees,
    /// which is how a clipped operand is merged back into the other tree.
    ///
    /// A fresh node takes the *first* polygon's plane as its splitting plane;
    /// no balance heuristic is applied.
    pub fn build(&mut self, polygons: &[Polygon<S>], eps: Real) {
        if polygons.is_empty() {
            return;
        }

        let mut stack = vec![(self, polygons.to_vec())];

        while let Some((node, polys)) = stack.pop() {
            if polys.is_empty() {
                continue;
            }

            if node.plane.is_none() {
                node.plane = Some(polys[0].plane.clone());
            }
            let plane = node.plane.clone().unwrap_or_else(|| polys[0].plane.clone());

            let mut front = Vec::with_capacity(polys.len() / 2);
            let mut back = Vec::with_capacity(polys.len() / 2);

            for polygon in &polys {
                let (coplanar_front, coplanar_back, mut front_parts, mut back_parts) =
                    plane.split_polygon(polygon, eps);

                node.polygons.extend(coplanar_front);
                node.polygons.extend(coplanar_back);
                front.append(&mut front_parts);
                back.append(&mut back_parts);
            }

            if !front.is_empty() {
                let front_node = node.front.get_or_insert_with(|| Box::new(Node::new()));
                stack.push((&mut **front_node, front));
            }

            if !back.is_empty() {
                let back_node = node.back.get_or_insert_with(|| Box::new(Node::new()));
                stack.push((&mut **back_node, back));
            }
        }
    }
}
