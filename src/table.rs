//! Open-addressed hash table keyed by interned-string identity.
//!
//! Used both for the VM's global-variable table and for the intern pool
//! itself (in which case the stored value is unused, conventionally `Nil`).
//! Ported from the reference implementation's linear-probing table with
//! tombstone support, retargeted at `Rc<ObjString>` keys.

use std::rc::Rc;

use crate::value::{ObjString, Value};

const MAX_LOAD_FACTOR: f64 = 0.75;
const MIN_CAPACITY: usize = 8;

struct Entry {
    key: Option<Rc<ObjString>>,
    value: Value,
}

impl Entry {
    fn empty() -> Self {
        Entry {
            key: None,
            value: Value::Nil,
        }
    }
}

#[derive(Default)]
pub struct Table {
    count: usize,
    entries: Vec<Entry>,
}

impl Table {
    pub fn new() -> Self {
        Table {
            count: 0,
            entries: Vec::new(),
        }
    }

    /// Number of occupied buckets, live entries plus tombstones left behind
    /// by `delete`. `delete` does not decrement this counter: a tombstone
    /// still occupies its bucket and must keep counting against the load
    /// factor, or a table with many deletions and few live entries would
    /// never get the resize-driven compaction that clears its tombstones.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Linear probe from `key`'s hash, stopping at a matching key or the
    /// first usable empty/tombstone slot (tombstones are reused).
    fn find_entry(entries: &[Entry], capacity: usize, key: &Rc<ObjString>) -> usize {
        let mut index = key.hash as usize % capacity;
        let mut tombstone: Option<usize> = None;
        loop {
            let entry = &entries[index];
            match &entry.key {
                Some(k) if Rc::ptr_eq(k, key) || k.bytes == key.bytes => return index,
                None if matches!(entry.value, Value::Nil) => {
                    return tombstone.unwrap_or(index);
                }
                None => {
                    if tombstone.is_none() {
                        tombstone = Some(index);
                    }
                }
                Some(_) => {}
            }
            index = (index + 1) % capacity;
        }
    }

    fn adjust_capacity(&mut self, capacity: usize) {
        let mut new_entries: Vec<Entry> = (0..capacity).map(|_| Entry::empty()).collect();
        let mut count = 0;
        for entry in self.entries.drain(..) {
            if let Some(key) = entry.key {
                let idx = Self::find_entry(&new_entries, capacity, &key);
                new_entries[idx].key = Some(key);
                new_entries[idx].value = entry.value;
                count += 1;
            }
        }
        self.entries = new_entries;
        self.count = count;
    }

    /// Insert or overwrite `key`. Returns `true` if `key` was not already
    /// present.
    pub fn set(&mut self, key: Rc<ObjString>, value: Value) -> bool {
        if (self.count + 1) as f64 > self.capacity() as f64 * MAX_LOAD_FACTOR {
            let new_capacity = if self.capacity() < MIN_CAPACITY {
                MIN_CAPACITY
            } else {
                self.capacity() * 2
            };
            self.adjust_capacity(new_capacity);
        }
        let idx = Self::find_entry(&self.entries, self.capacity(), &key);
        let entry = &mut self.entries[idx];
        let is_new_key = entry.key.is_none();
        if is_new_key && matches!(entry.value, Value::Nil) {
            self.count += 1;
        }
        entry.key = Some(key);
        entry.value = value;
        is_new_key
    }

    pub fn get(&self, key: &Rc<ObjString>) -> Option<Value> {
        if self.entries.is_empty() {
            return None;
        }
        let idx = Self::find_entry(&self.entries, self.capacity(), key);
        self.entries[idx].key.as_ref().map(|_| self.entries[idx].value.clone())
    }

    /// Remove `key`, leaving a tombstone behind so later probes keep
    /// working. `count` (see `len`) is left unchanged: the tombstone still
    /// occupies the bucket.
    pub fn delete(&mut self, key: &Rc<ObjString>) -> bool {
        if self.entries.is_empty() {
            return false;
        }
        let idx = Self::find_entry(&self.entries, self.capacity(), key);
        if self.entries[idx].key.is_none() {
            return false;
        }
        self.entries[idx].key = None;
        self.entries[idx].value = Value::Bool(true);
        true
    }

    /// Look up an interned string by content rather than by `Rc` identity;
    /// this is how the intern pool is queried before allocating a new one.
    pub fn find_string(&self, bytes: &str, hash: u32) -> Option<Rc<ObjString>> {
        if self.entries.is_empty() {
            return None;
        }
        let capacity = self.capacity();
        let mut index = hash as usize % capacity;
        loop {
            let entry = &self.entries[index];
            match &entry.key {
                Some(k) if k.hash == hash && k.bytes == bytes => return Some(k.clone()),
                None if matches!(entry.value, Value::Nil) => return None,
                _ => {}
            }
            index = (index + 1) % capacity;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(bytes: &str) -> Rc<ObjString> {
        Rc::new(ObjString {
            hash: crate::value::fnv1a(bytes.as_bytes()),
            bytes: bytes.to_string(),
        })
    }

    #[test]
    fn set_then_get_round_trips() {
        let mut table = Table::new();
        let k = key("answer");
        assert!(table.set(k.clone(), Value::Number(42.0)));
        assert_eq!(table.get(&k), Some(Value::Number(42.0)));
    }

    #[test]
    fn delete_then_get_is_absent() {
        let mut table = Table::new();
        let k = key("transient");
        table.set(k.clone(), Value::Bool(false));
        assert!(table.delete(&k));
        assert_eq!(table.get(&k), None);
    }

    #[test]
    fn tombstones_do_not_break_later_probes() {
        let mut table = Table::new();
        let a = key("a");
        let b = key("b");
        table.set(a.clone(), Value::Number(1.0));
        table.set(b.clone(), Value::Number(2.0));
        table.delete(&a);
        // b must still be reachable even though a tombstone sits upstream
        // of it in the probe sequence for colliding hashes.
        assert_eq!(table.get(&b), Some(Value::Number(2.0)));
        assert_eq!(table.get(&a), None);
    }

    #[test]
    fn resizing_preserves_all_live_entries() {
        let mut table = Table::new();
        let keys: Vec<_> = (0..64).map(|i| key(&format!("k{i}"))).collect();
        for (i, k) in keys.iter().enumerate() {
            table.set(k.clone(), Value::Number(i as f64));
        }
        for (i, k) in keys.iter().enumerate() {
            assert_eq!(table.get(k), Some(Value::Number(i as f64)));
        }
        assert_eq!(table.len(), keys.len());
    }

    #[test]
    fn find_string_dedups_by_content() {
        let mut table = Table::new();
        let k = key("shared");
        table.set(k.clone(), Value::Nil);
        let hash = crate::value::fnv1a(b"shared");
        let found = table.find_string("shared", hash).expect("present");
        assert!(Rc::ptr_eq(&found, &k));
    }
}
