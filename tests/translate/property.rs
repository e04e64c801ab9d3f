//! Property suites over generated inputs.

use proptest::prelude::*;

use ingot::ast::{BlockAst, ConstAst, ParamAst, TypeAst, TypedValueAst, ValueAst};
use ingot::ident::LocalIdent;
use ingot::translate;

use crate::helpers::*;

/// Builds a function with `n_params` unnamed parameters and `n_insts`
/// unnamed additions in a single unnamed block.
fn unnamed_func(n_params: usize, n_insts: usize) -> ingot::ast::Module {
    let params = (0..n_params).map(|_| ParamAst::new(i(32))).collect();
    let insts = (0..n_insts)
        .map(|k| {
            add(
                TypedValueAst::int(32, k as i128),
                ValueAst::Const(ConstAst::Int(1)),
            )
        })
        .collect();
    module(vec![func_def(
        "f",
        TypeAst::Void,
        params,
        vec![BlockAst::new(insts, ret_void())],
    )])
}

proptest! {
    #[test]
    fn local_ids_form_a_gap_free_sequence(n_params in 0usize..8, n_insts in 0usize..16) {
        let out = translate(&unnamed_func(n_params, n_insts)).expect("translation should succeed");
        let f = &out.funcs[0];

        let mut numbers = Vec::new();
        for p in &f.params {
            let Some(LocalIdent::Num(n)) = f.value_name(p.value) else {
                panic!("unnamed parameter should have been numbered");
            };
            numbers.push(*n);
        }
        for block in &f.blocks {
            let Some(LocalIdent::Num(n)) = &block.name else {
                panic!("unnamed block should have been numbered");
            };
            numbers.push(*n);
            for inst in &block.insts {
                if let Some(slot) = inst.result() {
                    let Some(LocalIdent::Num(n)) = f.value_name(slot) else {
                        panic!("unnamed result should have been numbered");
                    };
                    numbers.push(*n);
                }
            }
        }
        let expected: Vec<u64> = (0..numbers.len() as u64).collect();
        prop_assert_eq!(numbers, expected);
    }

    #[test]
    fn assignment_is_idempotent_over_generated_functions(
        n_params in 0usize..8,
        n_insts in 0usize..16,
    ) {
        let out = translate(&unnamed_func(n_params, n_insts)).expect("translation should succeed");
        let mut f = out.funcs[0].clone();
        let before = f.clone();
        f.assign_local_ids().expect("re-running assignment is a no-op");
        prop_assert_eq!(f, before);
    }

    #[test]
    fn translation_is_deterministic_over_generated_modules(
        n_globals in 0usize..8,
        n_types in 0usize..6,
        n_funcs in 0usize..4,
    ) {
        let mut entities = Vec::new();
        for t in 0..n_types {
            entities.push(typedef(
                &format!("t{t}"),
                TypeAst::Struct {
                    packed: t % 2 == 0,
                    fields: vec![i(8 << (t % 4))],
                },
            ));
        }
        for n in 0..n_globals {
            entities.push(global_def(&format!("g{n}"), i(32), ConstAst::Int(n as i128)));
        }
        for n in 0..n_funcs {
            entities.push(func_def(
                &format!("f{n}"),
                TypeAst::Void,
                vec![ParamAst::new(i(64))],
                vec![BlockAst::new(vec![], ret_void())],
            ));
        }
        let m = module(entities);
        let first = translate(&m).expect("translation should succeed");
        let second = translate(&m).expect("translation should succeed");
        prop_assert_eq!(first, second);
    }

    #[test]
    fn named_struct_identity_holds_across_reference_chains(n_types in 1usize..8) {
        // Each %tK points at %t((K+1) mod n), closing a cycle.
        let mut entities = Vec::new();
        for t in 0..n_types {
            let next = (t + 1) % n_types;
            entities.push(typedef(
                &format!("t{t}"),
                TypeAst::Struct {
                    packed: false,
                    fields: vec![ptr(named(&format!("t{next}")))],
                },
            ));
        }
        entities.push(global_decl("anchor", named("t0")));
        let out = translate(&module(entities)).expect("translation should succeed");

        for t in 0..n_types {
            let id = out.types.named(&format!("t{t}")).expect("type should exist");
            let ingot::ir::TypeKind::Struct { fields, .. } = out.types.kind(id) else {
                panic!("expected struct body");
            };
            let next = out.types.named(&format!("t{}", (t + 1) % n_types)).unwrap();
            prop_assert_eq!(out.types.pointee(fields[0]), Some(next));
        }
    }
}
