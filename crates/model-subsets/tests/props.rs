//! Property coverage for the subset resolution rules.

use model_subsets::prelude::*;
use proptest::prelude::*;
use std::collections::BTreeMap;

type RawTable = BTreeMap<String, (Vec<String>, bool)>;

fn ident() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,11}"
}

fn table() -> impl Strategy<Value = RawTable> {
    proptest::collection::btree_map(
        ident(),
        (proptest::collection::vec(ident(), 1..5), any::<bool>()),
        1..6,
    )
}

fn declare_all(builder: &mut ModelBuilder<'_>, table: &RawTable) {
    for (id, (fields, opt_in)) in table {
        let fields: Vec<&str> = fields.iter().map(String::as_str).collect();
        builder
            .declare_fieldset(id, &fields, FieldsetOptions { opt_in: *opt_in })
            .unwrap();
    }
}

fn assert_no_duplicate_fields(fields: &[FieldId]) -> Result<(), TestCaseError> {
    for (i, field) in fields.iter().enumerate() {
        prop_assert!(
            !fields[..i].contains(field),
            "duplicate field '{field}' in {fields:?}"
        );
    }

    Ok(())
}

proptest! {
    // A plain subset selects exactly the opt-out fieldsets.
    #[test]
    fn default_subsets_select_exactly_opt_out_fieldsets(table in table()) {
        let mut builder = ModelBuilder::new();
        declare_all(&mut builder, &table);
        builder.declare_subset("everything", SubsetOptions::new()).unwrap();
        let model = builder.build();

        let def = model.subset("everything").unwrap();
        for (id, (_, opt_in)) in &table {
            prop_assert_eq!(def.has_fieldset(id), !*opt_in, "fieldset '{}'", id);
        }

        assert_no_duplicate_fields(model.subset_fields("everything").unwrap())?;
    }

    // only/except/add with arbitrary (and unknown) references: the build
    // never fails, additions always survive, opt-in fieldsets appear only
    // when added, and unknown references vanish.
    #[test]
    fn directive_selection_invariants(
        table in table(),
        use_only in any::<bool>(),
        only_picks in proptest::collection::vec(any::<prop::sample::Index>(), 0..4),
        except_picks in proptest::collection::vec(any::<prop::sample::Index>(), 0..4),
        add_picks in proptest::collection::vec(any::<prop::sample::Index>(), 0..4),
    ) {
        let names: Vec<&String> = table.keys().collect();

        let mut only_names: Vec<&str> = Vec::new();
        let mut except_names: Vec<&str> = Vec::new();
        let mut added: Vec<&str> = Vec::new();

        let mut options = SubsetOptions::new();
        if use_only {
            for pick in &only_picks {
                let name = names[pick.index(names.len())].as_str();
                only_names.push(name);
                options = options.only(name);
            }
        }
        for pick in &except_picks {
            let name = names[pick.index(names.len())].as_str();
            except_names.push(name);
            options = options.except(name);
        }
        for pick in &add_picks {
            let name = names[pick.index(names.len())].as_str();
            added.push(name);
            options = options.add(name);
        }
        // unknown references in any directive are pruned, never fatal;
        // these names are longer than the generator can produce
        options = options
            .except("zz_unknown_fieldset")
            .add("zz_missing_fieldset");

        let mut builder = ModelBuilder::new();
        declare_all(&mut builder, &table);
        builder.declare_subset("profile", options).unwrap();
        let model = builder.build();

        let def = model.subset("profile").unwrap();

        // resolved selection stays within the declared table
        for fieldset in &def.fieldsets {
            prop_assert!(table.contains_key(fieldset.as_str()));
        }
        prop_assert!(!def.has_fieldset("zz_missing_fieldset"));

        // add always wins over only/except
        for name in &added {
            prop_assert!(def.has_fieldset(name), "added '{}' missing", name);
        }

        for (id, (_, opt_in)) in &table {
            let in_added = added.contains(&id.as_str());
            if *opt_in && !in_added {
                prop_assert!(!def.has_fieldset(id), "opt-in '{}' leaked in", id);
            }
            if except_names.contains(&id.as_str()) && !in_added {
                prop_assert!(!def.has_fieldset(id), "excluded '{}' survived", id);
            }
            if !only_names.is_empty() && !in_added && !only_names.contains(&id.as_str()) {
                prop_assert!(!def.has_fieldset(id), "'{}' escaped only", id);
            }
        }

        assert_no_duplicate_fields(model.subset_fields("profile").unwrap())?;
    }

    // extends copies the parent selection; the child never reaches beyond
    // the parent unless it adds explicitly.
    #[test]
    fn extends_preserves_parent_selection(table in table()) {
        let mut builder = ModelBuilder::new();
        declare_all(&mut builder, &table);
        builder.declare_subset("parent", SubsetOptions::new()).unwrap();
        builder
            .declare_subset("child", SubsetOptions::new().extends("parent"))
            .unwrap();
        let model = builder.build();

        let parent = model.subset("parent").unwrap();
        let child = model.subset("child").unwrap();
        prop_assert_eq!(&parent.fieldsets, &child.fieldsets);
        prop_assert_eq!(
            model.subset_fields("parent").unwrap(),
            model.subset_fields("child").unwrap()
        );
    }
}
