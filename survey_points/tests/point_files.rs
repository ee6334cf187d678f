use assert_fs::prelude::*;
use predicates::prelude::*;
use survey_points::{
    io::{preview_file, read_points_file, write_points_csv, Delimiter, ImportOptions},
    SurveyPoint,
};

#[test]
fn export_then_import_reconstructs_points() {
    let dir = assert_fs::TempDir::new().unwrap();
    let file = dir.child("points.csv");
    let points = vec![
        SurveyPoint::new("1", 5_012_345.678_9, 312_456.123_4, 101.25, "Iron pin"),
        SurveyPoint::new("A-2", 0.1 + 0.2, -1.0e-7, 1.0 / 3.0, "say \"hi\""),
        SurveyPoint::new("4", 1.0, 2.0, 3.0, "Iron pin, NE corner"),
        SurveyPoint::new("\"B\"", 1.0, 2.0, 3.0, "MH; rim"),
        SurveyPoint::new("3", 0.0, 0.0, 0.0, ""),
    ];
    write_points_csv(file.path(), &points).unwrap();

    let read = read_points_file(file.path(), &ImportOptions::default()).unwrap();
    assert_eq!(read.len(), points.len());
    for (a, b) in read.iter().zip(&points) {
        assert_eq!(a.id, b.id);
        assert_eq!(a.northing.to_bits(), b.northing.to_bits());
        assert_eq!(a.easting.to_bits(), b.easting.to_bits());
        assert_eq!(a.elevation.to_bits(), b.elevation.to_bits());
        assert_eq!(a.description, b.description);
    }
    dir.close().unwrap();
}

#[test]
fn export_writes_five_fields() {
    let dir = assert_fs::TempDir::new().unwrap();
    let file = dir.child("points.csv");
    write_points_csv(
        file.path(),
        &[
            SurveyPoint::new("1", 100.0, 200.0, 10.0, "Point 1"),
            SurveyPoint::new("2", 110.0, 210.0, 0.0, "Iron pin, NE corner"),
        ],
    )
    .unwrap();
    file.assert("1,100,200,10,Point 1\n2,110,210,0,\"Iron pin, NE corner\"\n");
    dir.close().unwrap();
}

#[test]
fn legacy_export_still_imports() {
    let dir = assert_fs::TempDir::new().unwrap();
    let file = dir.child("legacy.csv");
    file.write_str("1,100,200,10,\"Point 1\n2,110,210,11.5,\"Point 2\n")
        .unwrap();
    let read = read_points_file(file.path(), &ImportOptions::default()).unwrap();
    assert_eq!(read[0].description, "Point 1");
    assert_eq!(read[1], SurveyPoint::new("2", 110.0, 210.0, 11.5, "Point 2"));
    dir.close().unwrap();
}

#[test]
fn quoted_semicolon_file_imports() {
    let dir = assert_fs::TempDir::new().unwrap();
    let file = dir.child("points.txt");
    file.write_str("1;100;200;10;\"Fence; NW corner\"\n").unwrap();
    let opts = ImportOptions {
        delimiter: Delimiter::Semicolon,
        ..ImportOptions::default()
    };
    let read = read_points_file(file.path(), &opts).unwrap();
    assert_eq!(
        read,
        vec![SurveyPoint::new("1", 100.0, 200.0, 10.0, "Fence; NW corner")]
    );
    dir.close().unwrap();
}

#[test]
fn tab_file_with_header_and_custom_columns() {
    let dir = assert_fs::TempDir::new().unwrap();
    let file = dir.child("points.txt");
    file.write_str("desc\tE\tN\tZ\tnumber\nCurb\t200\t100\t\t9\nTree\t210\t110\t5\t10\n")
        .unwrap();
    let opts = ImportOptions {
        delimiter: Delimiter::Tab,
        skip_header: true,
        mapping: "DENZP".parse().unwrap(),
    };
    let read = read_points_file(file.path(), &opts).unwrap();
    // empty elevation cell does not parse, so the curb row is dropped
    assert_eq!(read, vec![SurveyPoint::new("10", 110.0, 210.0, 5.0, "Tree")]);
    dir.close().unwrap();
}

#[test]
fn preview_reads_first_rows_only() {
    let dir = assert_fs::TempDir::new().unwrap();
    let file = dir.child("many.csv");
    let body: String = (0..25).map(|i| format!("{},1,2,3\n", i)).collect();
    file.write_str(&body).unwrap();
    file.assert(predicate::str::contains("24,1,2,3"));

    let preview = preview_file(file.path(), Delimiter::Comma, false, 10).unwrap();
    assert_eq!(preview.rows.len(), 10);
    assert_eq!(preview.column_count, 4);
    dir.close().unwrap();
}

#[test]
fn missing_import_file_is_an_error() {
    let dir = assert_fs::TempDir::new().unwrap();
    let res = read_points_file(&dir.path().join("none.csv"), &ImportOptions::default());
    assert!(res.is_err());
}
