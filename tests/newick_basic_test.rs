use taxotree::{ParsedNode, TreeParseError, parse_newick};

fn parse(newick_str: &str) -> ParsedNode {
    parse_newick(newick_str)
        .unwrap_or_else(|err| panic!("Failed to parse {newick_str:?}: {err}"))
}

fn child_names(node: &ParsedNode) -> Vec<Option<&str>> {
    node.children.iter().map(|child| child.name.as_deref()).collect()
}

#[test]
fn test_leaf_annotations() {
    let test_cases = vec![
        ("Accession only", "(A[ACC1],B);", Some("A"), Some("ACC1"), None),
        (
            "Accession and taxon id",
            "(A[ACC123|9606],B);",
            Some("A"),
            Some("ACC123"),
            Some("9606"),
        ),
        (
            "Split on first pipe only",
            "(A[ACC|96|06],B);",
            Some("A"),
            Some("ACC"),
            Some("96|06"),
        ),
        (
            "Spaces in name",
            "(Homo sapiens[GCF_000001405.40|9606],B);",
            Some("Homo sapiens"),
            Some("GCF_000001405.40"),
            Some("9606"),
        ),
        ("Empty accession", "(A[|9606],B);", Some("A"), None, Some("9606")),
        ("Empty taxon id", "(A[ACC|],B);", Some("A"), Some("ACC"), None),
        ("Empty brackets stay literal", "(A[],B);", Some("A[]"), None, None),
        ("Bracket without name", "([ACC],B);", Some("[ACC]"), None, None),
        ("Text after bracket", "(A[ACC]x,B);", Some("A[ACC]x"), None, None),
        ("Nested open bracket", "(A[x[y],B);", Some("A"), Some("x[y"), None),
        ("Taxon id on a leaf", "(A{42},B);", Some("A"), None, Some("42")),
    ];

    for (name, newick_str, expected_name, expected_accession, expected_taxon) in
        test_cases
    {
        println!("Testing: {}", name);
        let root = parse(newick_str);
        assert_eq!(root.children.len(), 2, "Wrong child count for {name}");

        let first = &root.children[0];
        assert_eq!(first.name.as_deref(), expected_name, "Name for {name}");
        assert_eq!(
            first.accession.as_deref(),
            expected_accession,
            "Accession for {name}"
        );
        assert_eq!(
            first.taxon_id.as_deref(),
            expected_taxon,
            "Taxon id for {name}"
        );
        assert!(first.is_leaf(), "{name}: first child should be a leaf");
    }
}

#[test]
fn test_accession_round_trip() {
    let accessions =
        ["GCF_000001405.40", "x", "a b c", "ACC-1/2", "Ünïcödé漢字", "9606"];

    for accession in accessions {
        let root = parse(&format!("(A[{accession}],B);"));
        assert_eq!(root.children.len(), 2);
        assert_eq!(root.children[0].name.as_deref(), Some("A"));
        assert_eq!(root.children[0].accession.as_deref(), Some(accession));
        assert_eq!(root.children[0].taxon_id, None);
    }
}

#[test]
fn test_single_leaf_with_taxon_id() {
    let root = parse("A[ACC123|9606]");
    assert!(root.is_leaf());
    assert_eq!(root.name.as_deref(), Some("A"));
    assert_eq!(root.accession.as_deref(), Some("ACC123"));
    assert_eq!(root.taxon_id.as_deref(), Some("9606"));
    assert_eq!(root.branch_length, None);
}

#[test]
fn test_internal_annotations() {
    let root = parse("(A,B)Root{1234};");
    assert_eq!(root.name.as_deref(), Some("Root"));
    assert_eq!(root.taxon_id.as_deref(), Some("1234"));
    assert_eq!(root.accession, None);
    assert_eq!(child_names(&root), vec![Some("A"), Some("B")]);

    let root = parse("(A,B)Root{};");
    assert_eq!(root.name.as_deref(), Some("Root{}"));
    assert_eq!(root.taxon_id, None);

    let root = parse("(A,B)Root[ACC9];");
    assert_eq!(root.name.as_deref(), Some("Root"));
    assert_eq!(root.accession.as_deref(), Some("ACC9"));
}

#[test]
fn test_empty_input() {
    for newick_str in ["", ";", "   ", "  ;\n", "\t\n"] {
        assert_eq!(
            parse_newick(newick_str),
            Err(TreeParseError::EmptyInput),
            "{newick_str:?} should be empty input"
        );
    }

    // Only one trailing semicolon is removed.
    let root = parse(";;");
    assert_eq!(root.name.as_deref(), Some(";"));
}

#[test]
fn test_branch_lengths() {
    let test_cases = vec![
        ("Plain", "A:0.5;", Some(0.5)),
        ("Exponent", "A:1.5e2;", Some(150.0)),
        ("Not a number", "A:notanumber;", Some(0.0)),
        ("Numeric prefix", "A:0.25abc;", Some(0.25)),
        ("Empty", "A:;", Some(0.0)),
        ("Infinity", "A:Infinity;", Some(f64::INFINITY)),
        ("Negative infinity", "A:-Infinity;", Some(f64::NEG_INFINITY)),
        ("Dangling exponent", "A:2.5e;", Some(2.5)),
        ("Absent", "A;", None),
    ];

    for (name, newick_str, expected) in test_cases {
        println!("Testing: {}", name);
        let root = parse(newick_str);
        assert_eq!(root.name.as_deref(), Some("A"), "Name for {name}");
        assert_eq!(root.branch_length, expected, "Branch length for {name}");
    }

    let root = parse("((A:1,B:2)C:0.1,D[ACC|1]:3)E:0;");
    assert_eq!(root.branch_length, Some(0.0));
    let clade = &root.children[0];
    assert_eq!(clade.name.as_deref(), Some("C"));
    assert_eq!(clade.branch_length, Some(0.1));
    assert_eq!(clade.children[0].branch_length, Some(1.0));
    assert_eq!(clade.children[1].branch_length, Some(2.0));
    assert_eq!(root.children[1].accession.as_deref(), Some("ACC"));
    assert_eq!(root.children[1].branch_length, Some(3.0));
}

#[test]
fn test_long_malformed_branch_length() {
    // Numeric prefix followed by a long run of exponent markers.
    let length: usize = 200_000;
    let newick_str =
        format!("(A:1.{}{},B:2);", "0".repeat(length), "e".repeat(length));
    let root = parse(&newick_str);
    assert_eq!(root.children.len(), 2);
    assert_eq!(root.children[0].branch_length, Some(1.0));
    assert_eq!(root.children[1].branch_length, Some(2.0));

    let newick_str = format!("A:{}x;", "1".repeat(length));
    let root = parse(&newick_str);
    assert_eq!(root.branch_length, Some(f64::INFINITY));
}

#[test]
fn test_lenient_structure() {
    let test_cases = vec![
        ("Missing close paren", "(A,B", vec![Some("A"), Some("B")]),
        ("Extra close paren", "(A,B))C", vec![Some("A"), Some("B")]),
        ("Trailing comma", "(A,);", vec![Some("A")]),
        ("Double comma", "(A,,B);", vec![Some("A"), None, Some("B")]),
        ("Empty clade", "();", vec![None]),
        ("Missing comma between clades", "((A,B)(C,D));", vec![None, None]),
        ("Trailing text after root", "(A)B(C);", vec![Some("A")]),
    ];

    for (name, newick_str, expected_children) in test_cases {
        println!("Testing: {}", name);
        let root = parse(newick_str);
        assert_eq!(child_names(&root), expected_children, "{name}");
    }

    let root = parse("(A,(B,C)");
    assert_eq!(root.children.len(), 2);
    assert_eq!(child_names(&root.children[1]), vec![Some("B"), Some("C")]);

    let root = parse("(A)B(C);");
    assert_eq!(root.name.as_deref(), Some("B"));

    let root = parse("A(B)");
    assert_eq!(root.name.as_deref(), Some("A"));
    assert!(root.is_leaf());
}

#[test]
fn test_whitespace_handling() {
    let root = parse("  \n(A,B)C;  \n");
    assert_eq!(root.name.as_deref(), Some("C"));
    assert_eq!(root.children.len(), 2);

    // Inner whitespace belongs to the labels.
    let root = parse("( A ,B );");
    assert_eq!(child_names(&root), vec![Some(" A "), Some("B ")]);
}

#[test]
fn test_fixture_structure() {
    let root = parse(include_str!("data/primates.newick"));
    assert_eq!(root.name.as_deref(), Some("Catarrhini"));
    assert_eq!(root.taxon_id.as_deref(), Some("9526"));
    assert_eq!(root.node_count(), 17);
    assert_eq!(
        child_names(&root),
        vec![Some("Hominidae"), Some("Cercopithecidae")]
    );

    let homininae = &root.children[0].children[0];
    assert_eq!(homininae.taxon_id.as_deref(), Some("207598"));
    assert_eq!(homininae.children.len(), 4);

    let homo = &homininae.children[0];
    assert_eq!(homo.name.as_deref(), Some("Homo sapiens"));
    assert_eq!(homo.accession, None);
    assert_eq!(homo.children.len(), 1);
    assert_eq!(
        homo.children[0].accession.as_deref(),
        Some("GCF_000001405.40")
    );
}

#[test]
fn test_deeply_nested_input() {
    let depth: usize = 100_000;
    let newick_str =
        format!("{}A[ACC|1]{};", "(".repeat(depth), ")".repeat(depth));
    let root = parse(&newick_str);
    assert_eq!(root.node_count(), depth + 1);

    let mut node = &root;
    let mut levels: usize = 0;
    while let Some(child) = node.children.first() {
        node = child;
        levels += 1;
    }
    assert_eq!(levels, depth);
    assert_eq!(node.accession.as_deref(), Some("ACC"));
}
