pub mod fixtures;

use fixtures::*;
use kmodel::prelude::*;
use proptest::prelude::*;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// One declaration statement out of a fixed menu, all mutually compatible.
#[derive(Debug, Clone, Copy)]
enum Step {
    CustomerOrders,
    OrderLines,
    LineProduct,
    ProductToLine,
    EmployeeManager,
    PersonSpouse,
    PartnerOneToOne,
    CustomerName,
}

fn apply(registry: &ModelRegistry, step: Step) -> Result<(), ModelError> {
    registry.declare(|m| {
        match step {
            Step::CustomerOrders => {
                m.model_class::<Customer>(|c| {
                    c.one_to_many(Customer::ORDERS, Order::CUSTOMER).map(drop)
                })?;
            },
            Step::OrderLines => {
                m.model_class::<Order>(|c| c.one_to_many(Order::LINES, OrderLine::ORDER).map(drop))?;
            },
            Step::LineProduct => {
                m.model_class::<OrderLine>(|c| c.one_to::<Product, _>(OrderLine::PRODUCT).map(drop))?;
            },
            Step::ProductToLine => {
                m.model_class::<Product>(|c| c.to_one(OrderLine::PRODUCT).map(drop))?;
            },
            Step::EmployeeManager => {
                m.model_class::<Employee>(|c| {
                    c.many_to_one(Employee::MANAGER, Employee::REPORTS).map(drop)
                })?;
            },
            Step::PersonSpouse => {
                m.model_class::<Person>(|c| c.one_to_one(Person::SPOUSE, Person::SPOUSE).map(drop))?;
            },
            Step::PartnerOneToOne => {
                m.model_class::<B>(|c| c.one_to_one(B::PARTNER, C::PARTNER).map(drop))?;
            },
            Step::CustomerName => {
                m.model_class::<Customer>(|c| {
                    c.mutable_attribute(Customer::NAME);
                    Ok(())
                })?;
            },
        }
        Ok(())
    })
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        Just(Step::CustomerOrders),
        Just(Step::OrderLines),
        Just(Step::LineProduct),
        Just(Step::ProductToLine),
        Just(Step::EmployeeManager),
        Just(Step::PersonSpouse),
        Just(Step::PartnerOneToOne),
        Just(Step::CustomerName),
    ]
}

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

fn relation_count(registry: &ModelRegistry) -> usize {
    registry.classes().iter().map(|class| class.relations().len()).sum()
}

proptest! {
    #[test]
    fn relations_stay_symmetric_in_any_declaration_order(steps in proptest::collection::vec(step(), 1..24)) {
        let registry = ModelRegistry::new();
        for step in &steps {
            prop_assert!(apply(&registry, *step).is_ok());
        }

        for class in registry.classes() {
            for relation in class.relations() {
                let reverse = relation.reverse();
                prop_assert!(reverse.reverse().is_same(&relation));
                prop_assert_eq!(reverse.source_class(), relation.target_class());
                prop_assert_eq!(reverse.target_class(), relation.source_class());
                prop_assert_eq!(reverse.kind(), relation.kind().reverse());
                prop_assert!(reverse.source_class().relations().iter().any(|r| r.is_same(&reverse)));
            }
        }
    }

    #[test]
    fn replaying_declarations_changes_nothing(steps in proptest::collection::vec(step(), 1..16)) {
        let registry = ModelRegistry::new();
        for step in &steps {
            apply(&registry, *step).unwrap();
        }
        let classes = registry.len();
        let relations = relation_count(&registry);
        let snapshot = registry.snapshot();

        for step in steps.iter().rev() {
            apply(&registry, *step).unwrap();
        }

        prop_assert_eq!(registry.len(), classes);
        prop_assert_eq!(relation_count(&registry), relations);
        prop_assert_eq!(registry.snapshot(), snapshot);
    }

    #[test]
    fn handles_compare_and_hash_by_id(key in "[a-z]{1,8}", value in any::<i64>()) {
        let registry = ModelRegistry::new();
        registry
            .declare(|m| {
                m.model_class::<Product>(|c| {
                    c.property(key.clone(), value);
                    Ok(())
                })
                .map(drop)
            })
            .unwrap();

        let first = registry.lookup::<Product>().unwrap();
        let second = registry.lookup::<Product>().unwrap();
        let unrelated = ModelRegistry::new();
        unrelated.declare(|m| m.model_class::<Product>(|_| Ok(())).map(drop)).unwrap();
        let other_registry = unrelated.lookup::<Product>().unwrap();

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(hash_of(&first), hash_of(&second));
        // Same id, different property bags: still equal.
        prop_assert_eq!(&first, &other_registry);
        prop_assert_eq!(hash_of(&first), hash_of(&other_registry));
        prop_assert!(!first.is_same(&other_registry));

        registry.declare(|m| m.model_class::<Person>(|_| Ok(())).map(drop)).unwrap();
        let person = registry.lookup::<Person>().unwrap();
        prop_assert_ne!(&first, &person);
    }
}
