// tests/view_model_tests.rs
mod common; // Reference the common module

use aidla_cart::CartViewModel;
use common::*;

#[test]
fn stepper_states_follow_quantity_and_stock() {
  setup_tracing();
  // Scenario A: 2 of 5 in stock leaves both stepper controls enabled.
  let (cart, _storage) = cart_with(&[line("p1", 100, 2, Some(5))]);

  let vm = CartViewModel::project(&cart.read());
  assert_eq!(vm.total_coins, 200);
  assert!(vm.lines[0].increment_enabled);
  assert!(vm.lines[0].decrement_enabled);
  assert!(vm.checkout_enabled);
}

#[test]
fn decrement_disabled_at_quantity_floor() {
  setup_tracing();
  let (cart, _storage) = cart_with(&[line("p1", 100, 1, Some(5))]);

  let vm = CartViewModel::project(&cart.read());
  assert!(!vm.lines[0].decrement_enabled);
  assert!(vm.lines[0].increment_enabled);
}

#[test]
fn increment_disabled_at_stock_ceiling() {
  setup_tracing();
  let (cart, _storage) = cart_with(&[line("p1", 100, 5, Some(5)), line("p2", 50, 5, None)]);

  let vm = CartViewModel::project(&cart.read());
  assert!(!vm.lines[0].increment_enabled);
  // Unconstrained stock never disables increment.
  assert!(vm.lines[1].increment_enabled);
}

#[test]
fn violations_block_checkout() {
  setup_tracing();
  // Scenario C: a zero-stock line disables the checkout action.
  let (cart, _storage) = cart_with(&[line("p1", 100, 5, Some(0)), line("p2", 50, 1, None)]);

  let vm = CartViewModel::project(&cart.read());
  assert_eq!(vm.violation_count, 1);
  assert!(vm.lines[0].over_stock);
  assert!(!vm.checkout_enabled);
}

#[test]
fn empty_cart_disables_checkout() {
  setup_tracing();
  let (cart, _storage) = empty_cart();

  let vm = CartViewModel::project(&cart.read());
  assert!(vm.lines.is_empty());
  assert_eq!(vm.total_coins, 0);
  assert!(!vm.checkout_enabled);
}

#[test]
fn line_totals_match_price_times_quantity() {
  setup_tracing();
  let (cart, _storage) = cart_with(&[line("p1", 100, 3, None), line("p2", 250, 2, None)]);

  let vm = CartViewModel::project(&cart.read());
  assert_eq!(vm.lines[0].line_total, 300);
  assert_eq!(vm.lines[1].line_total, 500);
  assert_eq!(vm.total_coins, 800);
}
