//! Tests for the cut builders.

use super::*;
use orienteer_core::test_support::square_instance;
use rstest::{fixture, rstest};

#[fixture]
fn square() -> Instance {
    square_instance(39)
}

fn perimeter() -> Tour {
    Tour::new(vec![0, 1, 2, 3])
}

#[rstest]
#[case(&[0, 1, 2], 2.0, 3)]
#[case(&[1, 4, 2, 5], 3.0, 6)]
#[case(&[6, 3, 0, 2, 5], 4.0, 10)]
fn sec_has_unit_pairs_and_size_minus_one(
    #[case] fragment: &[usize],
    #[case] rhs: f64,
    #[case] pairs: usize,
) {
    let cut = subtour_elimination(fragment, 7, 7);
    assert_eq!(cut.op, ConstraintOp::LessEqual);
    assert_eq!(cut.rhs, rhs);
    assert_eq!(cut.len(), pairs);
    assert!(cut.coefficients.iter().all(|&c| c == 1.0));
}

#[rstest]
fn directed_sec_covers_ordered_pairs() {
    let cut = directed_subtour_elimination(&[0, 2, 3], 4);
    assert_eq!(cut.indices, vec![2, 3, 8, 11, 12, 14]);
    assert_eq!(cut.rhs, 2.0);
}

#[rstest]
fn master_sec_uses_edge_columns(square: Instance) {
    let cut = CutLibrary::new(&square).sec(&[1, 3, 2]);
    assert_eq!(cut.indices, vec![8, 7, 9]);
}

#[rstest]
#[case(square_instance(39))]
#[case(square_instance(0))]
fn benders_v0_forbids_the_node_set(#[case] instance: Instance) {
    let cut = CutLibrary::new(&instance).benders_v0(&perimeter());
    assert_eq!(cut.indices, vec![0, 1, 2, 3]);
    assert_eq!(cut.rhs, 3.0);
}

#[rstest]
fn benders_v1_penalises_far_nodes(square: Instance) {
    let cut = CutLibrary::new(&square).benders_v1(&perimeter(), 40);
    assert_eq!(cut.op, ConstraintOp::GreaterEqual);
    assert_eq!(cut.indices, vec![4, 5, 6, 7, 8, 9, 1, 2, 3]);
    assert_eq!(
        cut.coefficients,
        vec![10.0, 14.0, 10.0, 10.0, 14.0, 10.0, -28.0, -28.0, -28.0]
    );
    assert_eq!(cut.rhs, -44.0);
}

#[rstest]
fn benders_v2_keeps_the_tour_when_the_first_window_suffices(square: Instance) {
    let cuts = CutLibrary::new(&square).benders_v2(&perimeter(), 40);
    assert_eq!(cuts.len(), 3);
    for cut in cuts {
        assert_eq!(cut.indices, vec![0, 1, 2, 3]);
        assert_eq!(cut.rhs, 3.0);
    }
}

#[rstest]
fn benders_v2_drops_windows_until_the_budget_is_reachable() {
    let instance = square_instance(0);
    let cuts = CutLibrary::new(&instance).benders_v2(&perimeter(), 40);
    let sets: Vec<Vec<usize>> = cuts.iter().map(|cut| cut.indices.clone()).collect();
    assert_eq!(sets, vec![vec![0, 3], vec![0, 1, 2, 3], vec![0, 1, 2, 3]]);
    assert_eq!(cuts.first().map(|cut| cut.rhs), Some(1.0));
}

#[rstest]
fn op_subcost_weights_by_price(square: Instance) {
    let cut = CutLibrary::new(&square).op_subcost(&[0, 1, 3], 5);
    assert_eq!(cut.indices, vec![0, 1, 3]);
    assert_eq!(cut.coefficients, vec![0.0, 5.0, 5.0]);
    assert_eq!(cut.rhs, 5.0);
}

#[rstest]
fn sec_family_needs_fragments(square: Instance) {
    let library = CutLibrary::new(&square);
    assert!(library.family(CutFamily::Sec, &perimeter(), 40, &[]).is_empty());
    let fragments = [Tour::new(vec![0, 1, 2])];
    assert_eq!(
        library.family(CutFamily::Sec, &perimeter(), 40, &fragments).len(),
        1
    );
}

#[rstest]
#[case("SEC", CutFamily::Sec)]
#[case("bend_v0", CutFamily::BendersV0)]
#[case("BEND_V1", CutFamily::BendersV1)]
#[case("BEND_V2", CutFamily::BendersV2)]
fn families_parse_from_tokens(#[case] token: &str, #[case] expected: CutFamily) {
    assert_eq!(token.parse::<CutFamily>(), Ok(expected));
    assert_eq!(expected.is_benders(), expected != CutFamily::Sec);
}
