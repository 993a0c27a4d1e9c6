use wasm_scope_debugger::scopes::{DebugInfoBundle, RawScopeData};
use wasm_scope_debugger::GeneratedLocation;

fn bundle(json: &str) -> DebugInfoBundle {
    DebugInfoBundle::from_raw(RawScopeData::from_json(json).expect("fixture parses"))
}

fn at(source_id: &str, line: u64) -> GeneratedLocation {
    GeneratedLocation {
        source_id: source_id.to_string(),
        line,
    }
}

const SINGLE_SUBPROGRAM: &str = r#"{
    "code_section_offset": 0,
    "debug_info": [
        {
            "tag": "compile_unit",
            "low_pc": 0,
            "high_pc": 100,
            "children": [
                {
                    "tag": "subprogram",
                    "name": "main",
                    "linkage_name": "_Z4mainv",
                    "low_pc": 10,
                    "high_pc": 50,
                    "frame_base": "309f",
                    "children": [
                        { "tag": "formal_parameter", "name": "argc", "location": "ed0000" },
                        { "tag": "variable", "name": "total", "location": "ed0001" },
                        { "tag": "variable" }
                    ]
                }
            ]
        }
    ],
    "sources": ["main.cpp"]
}"#;

#[test]
fn pc_outside_every_subprogram_yields_no_scopes() {
    let bundle = bundle(SINGLE_SUBPROGRAM);
    assert!(bundle.search(&at("wasm0", 5)).is_empty());
    assert!(bundle.search(&at("wasm0", 50)).is_empty());
}

#[test]
fn pc_inside_a_subprogram_yields_it_with_decoded_variables() {
    let bundle = bundle(SINGLE_SUBPROGRAM);
    let scopes = bundle.search(&at("wasm0", 20));
    assert_eq!(scopes.len(), 1);

    let scope = &scopes[0];
    assert_eq!(scope.display_name, "main");
    assert!(scope.location.is_none());
    assert_eq!(scope.variables.frame_base.as_deref(), Some("0"));

    let vars = &scope.variables.vars;
    assert_eq!(vars.len(), 3);
    assert_eq!(vars[0].name, "argc");
    assert_eq!(vars[0].expr.as_deref(), Some("var0"));
    assert_eq!(vars[1].name, "total");
    assert_eq!(vars[1].expr.as_deref(), Some("var1"));
    // A variable without name or location keeps an empty name and no expr.
    assert_eq!(vars[2].name, "");
    assert_eq!(vars[2].expr, None);
}

#[test]
fn code_section_offset_shifts_the_pc() {
    let bundle = bundle(
        r#"{
            "code_section_offset": 1000,
            "debug_info": [
                {
                    "tag": "compile_unit",
                    "low_pc": 0,
                    "high_pc": 100,
                    "children": [
                        { "tag": "subprogram", "name": "f", "linkage_name": "_f",
                          "low_pc": 10, "high_pc": 50 }
                    ]
                }
            ],
            "sources": []
        }"#,
    );
    assert_eq!(bundle.search(&at("wasm0", 1020)).len(), 1);
    assert!(bundle.search(&at("wasm0", 20)).is_empty());
    // A location before the code section never resolves.
    assert!(bundle.search(&at("wasm0", 999)).is_empty());
}

#[test]
fn nested_subprograms_come_back_innermost_first() {
    let bundle = bundle(
        r#"{
            "debug_info": [
                {
                    "tag": "compile_unit",
                    "ranges": [[0, 100]],
                    "children": [
                        {
                            "tag": "subprogram", "name": "outer", "linkage_name": "_outer",
                            "low_pc": 0, "high_pc": 100,
                            "children": [
                                { "tag": "subprogram", "name": "inner", "linkage_name": "_inner",
                                  "low_pc": 10, "high_pc": 50 }
                            ]
                        }
                    ]
                }
            ],
            "sources": []
        }"#,
    );
    let scopes = bundle.search(&at("wasm0", 20));
    let names: Vec<_> = scopes.iter().map(|s| s.display_name.as_str()).collect();
    assert_eq!(names, ["inner", "outer"]);
}

#[test]
fn organizational_scopes_descend_without_range_filtering() {
    let bundle = bundle(
        r#"{
            "debug_info": [
                {
                    "tag": "compile_unit",
                    "low_pc": 0, "high_pc": 100,
                    "children": [
                        {
                            "tag": "namespace", "name": "ns",
                            "children": [
                                {
                                    "tag": "structure_type", "name": "Widget",
                                    "children": [
                                        { "tag": "subprogram", "name": "method",
                                          "linkage_name": "_m", "low_pc": 10, "high_pc": 50 }
                                    ]
                                }
                            ]
                        }
                    ]
                }
            ],
            "sources": []
        }"#,
    );
    let scopes = bundle.search(&at("wasm0", 20));
    assert_eq!(scopes.len(), 1);
    assert_eq!(scopes[0].display_name, "method");
}

const INLINED: &str = r#"{
    "code_section_offset": 0,
    "debug_info": [
        {
            "tag": "compile_unit",
            "low_pc": 0,
            "high_pc": 200,
            "children": [
                { "tag": "subprogram", "name": "inline_me", "linkage_name": "_Z9inline_mev",
                  "children": [] },
                {
                    "tag": "subprogram",
                    "name": "caller",
                    "linkage_name": "_Z6callerv",
                    "low_pc": 0,
                    "high_pc": 100,
                    "children": [
                        {
                            "tag": "inlined_subroutine",
                            "abstract_origin": "_Z9inline_mev",
                            "call_file": 1,
                            "call_line": 42,
                            "low_pc": 20,
                            "high_pc": 30,
                            "children": [
                                { "tag": "formal_parameter", "name": "x", "location": "ed0003" }
                            ]
                        }
                    ]
                }
            ]
        }
    ],
    "sources": ["lib.h", "caller.cpp"]
}"#;

#[test]
fn inlined_subroutine_resolves_its_origin_name() {
    let bundle = bundle(INLINED);
    let scopes = bundle.search(&at("wasm0", 25));
    assert_eq!(scopes.len(), 2);
    // Innermost first: the inlined frame, then its caller.
    assert_eq!(scopes[0].display_name, "inline_me");
    assert_eq!(scopes[0].variables.vars[0].expr.as_deref(), Some("var3"));
    assert_eq!(scopes[1].display_name, "caller");
}

#[test]
fn inlined_call_site_lands_on_the_enclosing_scope() {
    let bundle = bundle(INLINED);
    let scopes = bundle.search(&at("wasm0", 25));

    // The inlined frame itself carries no location.
    assert!(scopes[0].location.is_none());
    // The caller's frame is annotated with where the inlining call occurred.
    let caller_location = scopes[1].location.as_ref().expect("caller has call site");
    assert_eq!(caller_location.line, 42);
    assert_eq!(
        caller_location.source_id,
        "wasm0/originalSource-caller.cpp"
    );
}

#[test]
fn unresolvable_origin_still_emits_the_scope() {
    let bundle = bundle(
        r#"{
            "debug_info": [
                {
                    "tag": "subprogram", "name": "caller", "linkage_name": "_c",
                    "low_pc": 0, "high_pc": 100,
                    "children": [
                        { "tag": "inlined_subroutine", "abstract_origin": "_gone",
                          "low_pc": 20, "high_pc": 30 }
                    ]
                }
            ],
            "sources": []
        }"#,
    );
    let scopes = bundle.search(&at("wasm0", 25));
    assert_eq!(scopes.len(), 2);
    assert_eq!(scopes[0].display_name, "");
    assert_eq!(scopes[1].display_name, "caller");
}

#[test]
fn ranged_variable_locations_select_by_pc() {
    let bundle = bundle(
        r#"{
            "debug_info": [
                {
                    "tag": "subprogram", "name": "f", "linkage_name": "_f",
                    "low_pc": 0, "high_pc": 100,
                    "children": [
                        {
                            "tag": "variable", "name": "v",
                            "location": [
                                { "expr": "309f", "range": [0, 40] },
                                { "expr": "319f", "range": [40, 80] }
                            ]
                        }
                    ]
                }
            ],
            "sources": []
        }"#,
    );
    let expr_at = |line: u64| {
        let scopes = bundle.search(&at("wasm0", line));
        scopes[0].variables.vars[0].expr.clone()
    };
    assert_eq!(expr_at(20).as_deref(), Some("0"));
    assert_eq!(expr_at(60).as_deref(), Some("1"));
    assert_eq!(expr_at(90), None);
}
