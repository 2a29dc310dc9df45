//! Tests for the parameter memory.

use springseq::chat::ParameterMemory;
use springseq::config::MemoryConfig;

#[test]
fn evicts_oldest_when_full() {
    let mut memory = ParameterMemory::new(2);
    memory.push("a");
    memory.push("b");
    memory.push("c");

    assert_eq!(memory.len(), 2);
    assert_eq!(memory.recent(5), vec!["b", "c"]);
    assert_eq!(memory.recent(1), vec!["c"]);
}

#[test]
fn zero_capacity_still_keeps_one() {
    let mut memory = ParameterMemory::new(0);
    memory.push("only");
    assert_eq!(memory.capacity(), 1);
    assert_eq!(memory.recent(1), vec!["only"]);
}

#[test]
fn default_capacity_and_clear() {
    let mut memory = ParameterMemory::default();
    assert_eq!(memory.capacity(), 10);
    memory.push("x");
    memory.clear();
    assert!(memory.is_empty());
}

#[test]
fn capacity_comes_from_config() {
    let memory = ParameterMemory::from(&MemoryConfig { capacity: 4 });
    assert_eq!(memory.capacity(), 4);

    let defaults = ParameterMemory::from(&MemoryConfig::default());
    assert_eq!(defaults.capacity(), 10);
}
