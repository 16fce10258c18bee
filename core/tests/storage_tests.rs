// tests/storage_tests.rs
mod common; // Reference the common module

use std::fs;
use std::path::PathBuf;

use aidla_cart::{CartStorage, JsonFileStorage, SharedCart, CART_STORAGE_KEY};
use common::*;
use serial_test::serial;

fn test_dir() -> PathBuf {
  std::env::temp_dir().join("aidla_cart_storage_tests")
}

fn fresh_storage(name: &str) -> JsonFileStorage {
  let path = test_dir().join(format!("{}.json", name));
  let _ = fs::remove_file(&path);
  JsonFileStorage::at_path(path)
}

#[test]
#[serial]
fn default_path_is_named_after_the_storage_key() {
  let storage = JsonFileStorage::new(test_dir());
  let file_name = storage.path().file_name().unwrap().to_string_lossy().to_string();
  assert_eq!(file_name, format!("{}.json", CART_STORAGE_KEY));
}

#[test]
#[serial]
fn missing_file_reads_as_no_entry() {
  setup_tracing();
  let storage = fresh_storage("missing_file");
  assert!(storage.read().expect("read succeeds").is_none());
}

#[test]
#[serial]
fn write_then_read_round_trips() {
  setup_tracing();
  let storage = fresh_storage("round_trip");
  storage.write(r#"[{"product_id":"p1"}]"#).expect("write succeeds");
  assert_eq!(
    storage.read().expect("read succeeds").as_deref(),
    Some(r#"[{"product_id":"p1"}]"#)
  );

  storage.clear().expect("clear succeeds");
  assert!(storage.read().expect("read succeeds").is_none());
  // Clearing an absent entry is not an error.
  storage.clear().expect("second clear succeeds");
}

#[test]
#[serial]
fn cart_survives_process_restart_via_file() {
  setup_tracing();
  let storage = fresh_storage("restart");

  {
    let cart = SharedCart::load(storage.clone());
    cart.write().add(&snapshot("p1", 100, Some(5)), 2);
  }

  // A second load over the same file simulates the next page visit.
  let cart = SharedCart::load(storage);
  let guard = cart.read();
  assert_eq!(guard.len(), 1);
  assert_eq!(guard.items()[0].quantity, 2);
}

#[test]
#[serial]
fn corrupt_file_loads_as_empty_cart() {
  setup_tracing();
  let storage = fresh_storage("corrupt");
  storage.write("}{ not json").expect("write succeeds");

  let cart = SharedCart::load(storage);
  assert!(cart.read().is_empty());
}
