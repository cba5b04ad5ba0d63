//! Load, fill and save through real files

use chrono::NaiveDate;
use datestarts_core::{insert_date_starts, CellValue, Epoch, FillOptions, MemorySheet, Selection, Sheet};
use datestarts_sheets::{load_sheet, save_sheet, xlsx, SheetError};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

fn serial(year: i32, month: u32, day: u32) -> f64 {
    Epoch::default().to_serial(NaiveDate::from_ymd_opt(year, month, day).unwrap()) as f64
}

fn orders() -> MemorySheet {
    MemorySheet::from_rows(
        "Orders",
        vec![
            vec!["Order".into(), "Placed".into(), "Amount".into()],
            vec!["A-1".into(), serial(2024, 3, 15).into(), 120.0.into()],
            vec!["A-2".into(), serial(2024, 8, 2).into(), 75.5.into()],
            vec!["A-3".into(), CellValue::Empty, 10.0.into()],
            vec!["A-4".into(), serial(2024, 9, 9).into(), 3.0.into()],
        ],
    )
}

#[test]
fn xlsx_fill_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("orders.xlsx");
    save_sheet(&orders(), &path, Epoch::default()).unwrap();

    let mut sheet = load_sheet(&path, None).unwrap();
    assert_eq!(sheet.name(), "Orders");
    assert_eq!(sheet.cell(1, 1), CellValue::Number(serial(2024, 3, 15)));

    let report = insert_date_starts(&mut sheet, &Selection::cell(1), &FillOptions::new()).unwrap();
    assert_eq!(report.rows_filled(), 2);

    let out = dir.path().join("filled.xlsx");
    save_sheet(&sheet, &out, Epoch::default()).unwrap();

    let filled = load_sheet(&out, Some("Orders")).unwrap();
    assert_eq!(filled.cell(0, 1), CellValue::text("Year Start"));
    assert_eq!(filled.cell(0, 4), CellValue::text("Week Start"));
    assert_eq!(filled.cell(0, 5), CellValue::text("Placed"));
    assert_eq!(filled.cell(1, 1), CellValue::Number(serial(2024, 1, 1)));
    assert_eq!(filled.cell(1, 2), CellValue::Number(serial(2024, 1, 1)));
    assert_eq!(filled.cell(1, 3), CellValue::Number(serial(2024, 3, 1)));
    assert_eq!(filled.cell(1, 4), CellValue::Number(serial(2024, 3, 11)));
    assert_eq!(filled.cell(2, 2), CellValue::Number(serial(2024, 7, 1)));
    assert_eq!(filled.cell(2, 4), CellValue::Number(serial(2024, 7, 29)));
    // Scan stopped at the blank row; the row after it is untouched
    assert_eq!(filled.cell(4, 1), CellValue::Empty);
    assert_eq!(filled.cell(4, 5), CellValue::Number(serial(2024, 9, 9)));
    assert_eq!(filled.cell(4, 6), CellValue::Number(3.0));
}

#[test]
fn xlsx_unknown_worksheet() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("orders.xlsx");
    xlsx::save(&orders(), &path).unwrap();

    let err = load_sheet(&path, Some("Missing")).unwrap_err();
    match err {
        SheetError::UnknownWorksheet { name, available } => {
            assert_eq!(name, "Missing");
            assert_eq!(available, vec!["Orders".to_string()]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn csv_fill_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("visits.csv");
    std::fs::write(
        &path,
        "Visitor,Date\nann,2024-03-15\nbob,45506\ncid,\ndee,2024-01-04\n",
    )
    .unwrap();

    let mut sheet = load_sheet(&path, None).unwrap();
    assert_eq!(sheet.name(), "visits");

    let report = insert_date_starts(&mut sheet, &Selection::cell(1), &FillOptions::new()).unwrap();
    assert_eq!(report.rows_filled(), 2);
    save_sheet(&sheet, &path, Epoch::default()).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        written,
        "Visitor,Year Start,Quarter Start,Month Start,Week Start,Date\n\
         ann,2024-01-01,2024-01-01,2024-03-01,2024-03-11,2024-03-15\n\
         bob,2024-01-01,2024-07-01,2024-08-01,2024-07-29,2024-08-02\n\
         cid,,,,,\n\
         dee,,,,,2024-01-04\n"
    );
}

#[test]
fn csv_fill_keeps_other_columns_as_written() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("prices.csv");
    std::fs::write(&path, "Zip,Price,Date\n02134,1.50,2024-03-15\n007,1e3,45366\n").unwrap();

    let mut sheet = load_sheet(&path, None).unwrap();
    insert_date_starts(&mut sheet, &Selection::cell(2), &FillOptions::new()).unwrap();
    save_sheet(&sheet, &path, Epoch::default()).unwrap();

    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "Zip,Price,Year Start,Quarter Start,Month Start,Week Start,Date\n\
         02134,1.50,2024-01-01,2024-01-01,2024-03-01,2024-03-11,2024-03-15\n\
         007,1e3,2024-01-01,2024-01-01,2024-03-01,2024-03-11,2024-03-15\n"
    );
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempdir().unwrap();
    assert!(load_sheet(&dir.path().join("absent.csv"), None).is_err());
    assert!(load_sheet(&dir.path().join("absent.xlsx"), None).is_err());
}
