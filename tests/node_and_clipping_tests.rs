mod support;

use meshcsg::float_types::{EPSILON, Real};
use meshcsg::mesh::{bsp::Node, polygon::Polygon, vertex::Vertex};
use nalgebra::{Point3, Vector3};
use support::cube_quads;

fn small_triangle_at(z: Real) -> Polygon<()> {
    Polygon::new(
        vec![
            Vertex::new(Point3::new(-0.1, -0.1, z), Vector3::z()),
            Vertex::new(Point3::new(0.1, -0.1, z), Vector3::z()),
            Vertex::new(Point3::new(0.0, 0.1, z), Vector3::z()),
        ],
        None,
    )
}

#[test]
fn empty_node_passes_polygons_through() {
    let node: Node<()> = Node::new();
    let polys = vec![small_triangle_at(0.0)];
    let kept = node.clip_polygons(&polys, EPSILON);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0], polys[0]);
}

#[test]
fn cube_tree_keeps_all_faces() {
    // no cube face straddles another face's plane, so nothing gets split
    let node = Node::from_polygons(&cube_quads::<()>([0.0; 3], 0.5, None), EPSILON);
    assert_eq!(node.all_polygons().len(), 6);
}

#[test]
fn clip_discards_polygons_inside_the_solid() {
    let cube = Node::from_polygons(&cube_quads::<()>([0.0; 3], 0.5, None), EPSILON);

    let inside = small_triangle_at(0.0);
    assert!(cube.clip_polygons(&[inside], EPSILON).is_empty());

    let outside = small_triangle_at(2.0);
    let kept = cube.clip_polygons(&[outside.clone()], EPSILON);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0], outside);
}

#[test]
fn invert_swaps_inside_and_outside() {
    let mut cube = Node::from_polygons(&cube_quads::<()>([0.0; 3], 0.5, None), EPSILON);
    cube.invert();

    // the inverted solid contains everything *except* the old interior
    let inside = small_triangle_at(0.0);
    assert_eq!(cube.clip_polygons(&[inside], EPSILON).len(), 1);
    let outside = small_triangle_at(2.0);
    assert!(cube.clip_polygons(&[outside], EPSILON).is_empty());
}

#[test]
fn invert_is_an_involution() {
    let mut cube = Node::from_polygons(&cube_quads::<()>([0.0; 3], 0.5, None), EPSILON);

    let probes = vec![small_triangle_at(0.0), small_triangle_at(0.4), small_triangle_at(2.0)];
    let before = cube.clip_polygons(&probes, EPSILON);

    cube.invert();
    cube.invert();
    let after = cube.clip_polygons(&probes, EPSILON);

    assert_eq!(before, after);
}

#[test]
fn build_into_existing_tree_is_incremental() {
    let quads = cube_quads::<()>([0.0; 3], 0.5, None);
    let mut node = Node::from_polygons(&quads[..3], EPSILON);
    node.build(&quads[3..], EPSILON);
    assert_eq!(node.all_polygons().len(), 6);
}

#[test]
fn clip_to_removes_overlap_between_solids() {
    let mut a = Node::from_polygons(&cube_quads::<()>([0.0; 3], 0.5, None), EPSILON);
    let b = Node::from_polygons(&cube_quads::<()>([0.5, 0.5, 0.5], 0.5, None), EPSILON);

    a.clip_to(&b, EPSILON);

    // no surviving fragment of A may lie strictly inside B
    for poly in a.all_polygons() {
        for v in &poly.vertices {
            let strictly_inside = v.pos.x > EPSILON
                && v.pos.y > EPSILON
                && v.pos.z > EPSILON
                && v.pos.x < 1.0 - EPSILON
                && v.pos.y < 1.0 - EPSILON
                && v.pos.z < 1.0 - EPSILON;
            assert!(!strictly_inside, "fragment vertex {:?} is inside B", v.pos);
        }
    }
}
