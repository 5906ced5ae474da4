use roster_core::{Employee, MemoryStore, NewEmployee, RecordStore};

/// The canonical example record
#[allow(dead_code)]
pub fn ana() -> NewEmployee {
    NewEmployee::new("Ana", "ana@x.com")
        .with_position("Engineer")
        .with_department("R&D")
        .with_salary(90000.0)
}

/// A store pre-populated with `count` minimal records
#[allow(dead_code)]
pub fn store_with(count: usize) -> (MemoryStore, Vec<Employee>) {
    let store = MemoryStore::new();
    let created = (0..count)
        .map(|i| {
            store
                .insert(NewEmployee::new(format!("Emp {}", i), format!("emp{}@x.com", i)))
                .unwrap()
        })
        .collect();
    (store, created)
}
