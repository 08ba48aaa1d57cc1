use engine::{roll_sorted, Dice};

#[test]
fn seeded_dice_are_deterministic() {
    let mut a = Dice::from_seed(2025);
    let mut b = Dice::from_seed(2025);
    let xs: Vec<u8> = (0..50).map(|_| a.d6()).collect();
    let ys: Vec<u8> = (0..50).map(|_| b.d6()).collect();
    assert_eq!(xs, ys);
}

#[test]
fn d6_stays_in_range_and_hits_every_face() {
    let mut dice = Dice::from_seed(7);
    let mut seen = [false; 6];
    for _ in 0..600 {
        let v = dice.d6();
        assert!((1..=6).contains(&v));
        seen[usize::from(v - 1)] = true;
    }
    assert!(seen.iter().all(|s| *s));
}

#[test]
fn scripted_dice_replay_then_cycle() {
    let mut dice = Dice::from_scripted(vec![3, 1, 6]);
    let got: Vec<u8> = (0..5).map(|_| dice.d6()).collect();
    assert_eq!(got, vec![3, 1, 6, 3, 1]);
}

#[test]
fn roll_sorted_orders_descending() {
    let mut dice = Dice::from_scripted(vec![1, 5, 3]);
    assert_eq!(roll_sorted(&mut dice, 3), vec![5, 3, 1]);
}
