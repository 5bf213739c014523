//! Serialization round-trips over a corpus of representative sources.

use scad_ast::{from_dict, from_json_str, parse_string, to_dict, to_json_string, ParseOptions};

const CORPUS: &[&str] = &[
    "x = 10 + 5;",
    "result = (10 + 5) * 2;",
    "module box(size) { cube(size); }",
    "x = foo(1, b = 2);",
    "#translate([0,0,1]) cube(1);",
    "v = [for (i = [0:4]) if (i % 2 == 0) i * i];",
    "use <MCAD/gears.scad>",
    "function area(r) = 3.14159 * r ^ 2;",
    "f = function(x, y = 1) x + y;",
    "w = a ? b[2].x : let (t = 1) echo(t) assert(t > 0) t;",
    "for (i = 0; i < 3; i = i + 1) cube(i);",
    "intersection_for (i = [0:2]) rotate([0, 0, 30 * i]) cube([10, 1, 1]);",
    "!*%#cube(1);",
    "r = [10:-1:0]; z = [0:0];",
    "s = \"a\\\"b\\\\c\\nd\";",
    "if (x > 0) { cube(x); } else { sphere(1); }",
    "m = v[0][1];",
    "n = -2 ^ 2 + ~mask & bits | flags << 2;",
    "empty = [];",
    "mixed = [1, each [2, 3], for (i = [4:5]) i];",
];

#[test]
fn dict_round_trip_preserves_structure() {
    for source in CORPUS {
        let ast = parse_string(source, &ParseOptions::default()).unwrap();
        let rebuilt = from_dict(&to_dict(&ast, true)).unwrap();
        assert_eq!(ast, rebuilt, "dict round trip changed {source:?}");
    }
}

#[test]
fn json_round_trip_preserves_structure() {
    for source in CORPUS {
        let ast = parse_string(source, &ParseOptions::default()).unwrap();
        let json = to_json_string(&ast, true).unwrap();
        let rebuilt = from_json_str(&json).unwrap();
        assert_eq!(ast, rebuilt, "JSON round trip changed {source:?}");
    }
}

#[test]
fn round_trip_with_comment_nodes() {
    let options = ParseOptions { include_comments: true, ..ParseOptions::default() };
    let source = "// header\nx = 1; /* inline */\ny = 2;";
    let ast = parse_string(source, &options).unwrap();
    let rebuilt = from_dict(&to_dict(&ast, true)).unwrap();
    assert_eq!(ast, rebuilt);
}

#[test]
fn positionless_dict_still_rebuilds() {
    for source in CORPUS {
        let ast = parse_string(source, &ParseOptions::default()).unwrap();
        let dict = to_dict(&ast, false);
        assert!(from_dict(&dict).is_ok(), "positionless rebuild failed for {source:?}");
    }
}

#[cfg(feature = "yaml")]
#[test]
fn yaml_round_trip_preserves_structure() {
    use scad_ast::{from_yaml_str, to_yaml_string};
    for source in CORPUS {
        let ast = parse_string(source, &ParseOptions::default()).unwrap();
        let yaml = to_yaml_string(&ast, true).unwrap();
        let rebuilt = from_yaml_str(&yaml).unwrap();
        assert_eq!(ast, rebuilt, "YAML round trip changed {source:?}");
    }
}
