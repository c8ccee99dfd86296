use tabrs::{Cell, Error, RecodeRule, Table};

fn numbers(values: &[f64]) -> Vec<Cell> {
    values.iter().map(|&v| Cell::Number(v)).collect()
}

fn survey_table() -> Table {
    // Five survey responses; 99 is the "no answer" sentinel for age.
    Table::from_columns(vec![
        (
            "gender",
            vec![
                Cell::from("M"),
                Cell::from("F"),
                Cell::from("F"),
                Cell::from("M"),
                Cell::from("F"),
            ],
        ),
        ("age", numbers(&[32.0, 45.0, 25.0, 39.0, 99.0])),
        ("q1", numbers(&[1.0, 2.0, 2.0, 3.0, 1.0])),
        ("q2", numbers(&[1.0, 1.0, 2.0, 3.0, 2.0])),
    ])
    .unwrap()
}

#[test]
fn test_derive_propagates_missing() {
    let table = Table::from_columns(vec![
        ("q1", numbers(&[1.0, 2.0, 3.0])),
        ("q2", vec![Cell::Number(4.0), Cell::Missing, Cell::Number(6.0)]),
    ])
    .unwrap();

    let derived = table
        .derive("total", |row| row.cell("q1")?.checked_add(row.cell("q2")?))
        .unwrap();

    // A Missing operand makes the derived cell Missing, not an error.
    assert_eq!(
        derived.get_column("total").unwrap(),
        vec![Cell::Number(5.0), Cell::Missing, Cell::Number(9.0)]
    );
}

#[test]
fn test_sum_across() {
    let table = Table::from_columns(vec![
        ("q1", numbers(&[1.0, 2.0])),
        ("q2", numbers(&[3.0, 4.0])),
        ("q3", vec![Cell::Number(5.0), Cell::Missing]),
    ])
    .unwrap();

    let totals = table.sum_across("total", &["q1", "q2", "q3"]).unwrap();
    assert_eq!(
        totals.get_column("total").unwrap(),
        vec![Cell::Number(9.0), Cell::Missing]
    );

    assert!(matches!(
        table.sum_across("total", &["q1", "nope"]),
        Err(Error::ColumnNotFound(_))
    ));
}

#[test]
fn test_derive_type_mismatch() {
    let table = Table::from_columns(vec![
        ("age", numbers(&[32.0])),
        ("gender", vec![Cell::from("M")]),
    ])
    .unwrap();

    let result = table.derive("bad", |row| {
        row.cell("age")?.checked_add(row.cell("gender")?)
    });
    assert!(matches!(result, Err(Error::TypeMismatch(_))));
}

#[test]
fn test_division_yields_not_a_number() {
    let zero = Cell::Number(0.0);
    let one = Cell::Number(1.0);

    // An indeterminate division is tagged NotANumber, never Missing.
    let quotient = one.checked_div(&zero).unwrap();
    assert!(quotient.is_not_a_number());
    assert!(!quotient.is_missing());

    // NotANumber keeps propagating through arithmetic.
    let downstream = quotient.checked_add(&one).unwrap();
    assert!(downstream.is_not_a_number());

    // Missing still dominates over NotANumber.
    assert_eq!(quotient.checked_add(&Cell::Missing).unwrap(), Cell::Missing);
}

#[test]
fn test_sentinel_recode() {
    let table = survey_table();
    let recoded = table
        .replace_with_missing("age", &Cell::Number(99.0))
        .unwrap();

    assert_eq!(
        recoded.get_column("age").unwrap(),
        vec![
            Cell::Number(32.0),
            Cell::Number(45.0),
            Cell::Number(25.0),
            Cell::Number(39.0),
            Cell::Missing,
        ]
    );
    // The source table keeps its sentinel.
    assert_eq!(table.get_column("age").unwrap()[4], Cell::Number(99.0));
}

#[test]
fn test_conditional_recode_rule_order() {
    // Ages [32, 45, 25, 39, Missing] after sentinel removal; threshold
    // buckets applied in rule order, first match wins.
    let table = survey_table()
        .replace_with_missing("age", &Cell::Number(99.0))
        .unwrap();

    let rules = vec![
        RecodeRule::new(|row| row.number("age").map_or(false, |a| a > 75.0), "Elder"),
        RecodeRule::new(
            |row| {
                row.number("age")
                    .map_or(false, |a| (55.0..=75.0).contains(&a))
            },
            "Middle Aged",
        ),
        RecodeRule::new(|row| row.number("age").map_or(false, |a| a < 55.0), "Young"),
    ];
    let bucketed = table.recode("agecat", &rules).unwrap();

    assert_eq!(
        bucketed.get_column("agecat").unwrap(),
        vec![
            Cell::from("Young"),
            Cell::from("Young"),
            Cell::from("Young"),
            Cell::from("Young"),
            Cell::Missing,
        ]
    );
}

#[test]
fn test_recode_accumulates_across_calls() {
    let table = Table::from_columns(vec![("age", numbers(&[32.0, 45.0, 25.0]))]).unwrap();

    // First pass only labels the over-40 rows.
    let first = table
        .recode(
            "band",
            &[RecodeRule::new(
                |row| row.number("age").map_or(false, |a| a > 40.0),
                "Senior",
            )],
        )
        .unwrap();
    assert_eq!(
        first.get_column("band").unwrap(),
        vec![Cell::Missing, Cell::from("Senior"), Cell::Missing]
    );

    // A later pass touches only its own matches and keeps the earlier
    // assignment for non-matching rows.
    let second = first
        .recode(
            "band",
            &[RecodeRule::new(
                |row| row.number("age").map_or(false, |a| a < 30.0),
                "Junior",
            )],
        )
        .unwrap();
    assert_eq!(
        second.get_column("band").unwrap(),
        vec![Cell::Missing, Cell::from("Senior"), Cell::from("Junior")]
    );
}

#[test]
fn test_fill_missing() {
    let table = Table::from_columns(vec![(
        "age",
        vec![Cell::Number(32.0), Cell::Missing, Cell::Number(25.0)],
    )])
    .unwrap();

    let filled = table.fill_missing("age", 0).unwrap();
    assert_eq!(
        filled.get_column("age").unwrap(),
        numbers(&[32.0, 0.0, 25.0])
    );
}

#[test]
fn test_drop_incomplete_rows() {
    // Row 3 has two Missing cells; everything else is complete.
    let table = Table::from_columns(vec![
        (
            "a",
            vec![
                Cell::Number(1.0),
                Cell::Number(2.0),
                Cell::Number(3.0),
                Cell::Missing,
                Cell::Number(5.0),
            ],
        ),
        (
            "b",
            vec![
                Cell::from("v"),
                Cell::from("w"),
                Cell::from("x"),
                Cell::Missing,
                Cell::from("z"),
            ],
        ),
    ])
    .unwrap();

    let complete = table.drop_incomplete_rows();
    assert_eq!(complete.row_count(), 4);
    assert_eq!(
        complete.get_column("a").unwrap(),
        numbers(&[1.0, 2.0, 3.0, 5.0])
    );

    // NotANumber is present data and survives.
    let with_nan = Table::from_columns(vec![("a", vec![Cell::NotANumber])]).unwrap();
    assert_eq!(with_nan.drop_incomplete_rows().row_count(), 1);
}

#[test]
fn test_missing_counts() {
    let table = Table::from_columns(vec![(
        "age",
        vec![Cell::Number(32.0), Cell::Missing, Cell::Missing],
    )])
    .unwrap();

    assert_eq!(table.missing_count("age").unwrap(), 2);
    assert_eq!(table.present_count("age").unwrap(), 1);
}

#[test]
fn test_aggregates_missing_policy() {
    let table = Table::from_columns(vec![(
        "age",
        vec![
            Cell::Number(32.0),
            Cell::Number(45.0),
            Cell::Number(25.0),
            Cell::Number(39.0),
            Cell::Missing,
        ],
    )])
    .unwrap();

    // Default: any Missing operand makes the aggregate Missing.
    assert_eq!(table.sum("age", false).unwrap(), Cell::Missing);
    assert_eq!(table.mean("age", false).unwrap(), Cell::Missing);

    // ignore_missing excludes Missing cells entirely, not as zeros.
    assert_eq!(table.sum("age", true).unwrap(), Cell::Number(141.0));
    assert_eq!(table.mean("age", true).unwrap(), Cell::Number(35.25));

    // A mean over nothing but Missing is Missing.
    let empty = Table::from_columns(vec![("age", vec![Cell::Missing, Cell::Missing])]).unwrap();
    assert_eq!(empty.mean("age", true).unwrap(), Cell::Missing);

    // NotANumber poisons the aggregate once Missing is out of the way.
    let with_nan =
        Table::from_columns(vec![("age", vec![Cell::Number(1.0), Cell::NotANumber])]).unwrap();
    assert_eq!(with_nan.sum("age", true).unwrap(), Cell::NotANumber);

    // Text cells cannot be aggregated.
    let text = Table::from_columns(vec![("name", vec![Cell::from("alice")])]).unwrap();
    assert!(matches!(
        text.sum("name", false),
        Err(Error::TypeMismatch(_))
    ));
}
