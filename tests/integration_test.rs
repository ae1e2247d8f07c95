//! 통합 테스트 모듈
//!
//! 실제 워크북 파일을 만들어 전체 변환 흐름을 테스트합니다.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// 테스트용 워크북 생성 헬퍼 (시트 이름, 행 목록)
fn write_workbook(dir: &Path, name: &str, sheets: &[(&str, Vec<Vec<&str>>)]) -> PathBuf {
    use rust_xlsxwriter::Workbook;

    let path = dir.join(name);
    let mut wb = Workbook::new();

    for (sheet, rows) in sheets {
        let ws = wb.add_worksheet();
        ws.set_name(*sheet).unwrap();
        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                ws.write_string(r as u32, c as u16, *cell).unwrap();
            }
        }
    }

    wb.save(&path).unwrap();
    path
}

/// 사람 목록 + 숫자 셀이 있는 워크북
fn write_people_workbook(dir: &Path) -> PathBuf {
    use rust_xlsxwriter::Workbook;

    let path = dir.join("people.xlsx");
    let mut wb = Workbook::new();

    let ws = wb.add_worksheet();
    ws.set_name("People").unwrap();
    ws.write_string(0, 0, "First Name").unwrap();
    ws.write_string(0, 1, "Age").unwrap();
    ws.write_string(1, 0, "Ann").unwrap();
    ws.write_number(1, 1, 30).unwrap();
    ws.write_string(2, 0, "Bo").unwrap();
    ws.write_number(2, 1, 25).unwrap();

    let ws = wb.add_worksheet();
    ws.set_name("Empty").unwrap();

    wb.save(&path).unwrap();
    path
}

fn read_json(path: &Path) -> serde_json::Value {
    let text = fs::read_to_string(path).unwrap();
    serde_json::from_str(&text).unwrap()
}

mod workbook_tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use sheet2json::{
        CalamineSource, ConvertOptions, Coordinator, DirSink, SheetFilter, SheetSource, Statistics,
    };

    fn convert(input: &Path, out: &Path, options: ConvertOptions) -> Statistics {
        let source = CalamineSource::open(input).unwrap();
        let sink = DirSink::create(out).unwrap();
        let coordinator = Coordinator::new(options, SheetFilter::all());

        let sheets = coordinator.discover(&source);
        let stats = Statistics::new(sheets.len());
        coordinator.run(&source, &sink, &sheets, &stats);
        stats
    }

    #[test]
    fn test_sheet_names_in_workbook_order() {
        let temp_dir = TempDir::new().unwrap();
        let input = write_people_workbook(temp_dir.path());

        let source = CalamineSource::open(&input).unwrap();
        assert_eq!(source.sheet_names(), vec!["People", "Empty"]);
    }

    #[test]
    fn test_numbers_become_strings_in_header_order() {
        let temp_dir = TempDir::new().unwrap();
        let input = write_people_workbook(temp_dir.path());
        let out = temp_dir.path().join("out");

        let stats = convert(&input, &out, ConvertOptions::new().with_indent(None));

        assert_eq!(stats.get_success_count(), 2);
        assert_eq!(
            fs::read_to_string(out.join("People.json")).unwrap(),
            r#"[{"First Name":"Ann","Age":"30"},{"First Name":"Bo","Age":"25"}]"#
        );
    }

    #[test]
    fn test_empty_sheet_produces_empty_array() {
        let temp_dir = TempDir::new().unwrap();
        let input = write_people_workbook(temp_dir.path());
        let out = temp_dir.path().join("out");

        convert(&input, &out, ConvertOptions::new());

        assert_eq!(fs::read_to_string(out.join("Empty.json")).unwrap(), "[]");
    }

    #[test]
    fn test_snake_case_keys() {
        let temp_dir = TempDir::new().unwrap();
        let input = write_workbook(
            temp_dir.path(),
            "keys.xlsx",
            &[(
                "Keys",
                vec![
                    vec!["First Name", "  Multi   Space ", "ZIP"],
                    vec!["Ann", "x", "12345"],
                ],
            )],
        );
        let out = temp_dir.path().join("out");

        convert(&input, &out, ConvertOptions::new().with_normalize_keys(true));

        assert_eq!(
            read_json(&out.join("Keys.json")),
            json!([{"first_name": "Ann", "_multi_space_": "x", "zip": "12345"}])
        );
    }

    #[test]
    fn test_ragged_rows_are_padded_and_truncated() {
        let temp_dir = TempDir::new().unwrap();
        let input = write_workbook(
            temp_dir.path(),
            "ragged.xlsx",
            &[(
                "Ragged",
                vec![
                    vec!["a", "b"],
                    vec!["1"],
                    vec!["1", "2", "3"],
                    vec!["", "only b"],
                ],
            )],
        );
        let out = temp_dir.path().join("out");

        convert(&input, &out, ConvertOptions::new());

        assert_eq!(
            read_json(&out.join("Ragged.json")),
            json!([
                {"a": "1", "b": ""},
                {"a": "1", "b": "2"},
                {"a": "", "b": "only b"}
            ])
        );
    }

    #[test]
    fn test_pretty_output_is_valid_json_array() {
        let temp_dir = TempDir::new().unwrap();
        let input = write_workbook(
            temp_dir.path(),
            "many.xlsx",
            &[
                ("One", vec![vec!["k"], vec!["v1"]]),
                ("Two", vec![vec!["k"], vec!["v1"], vec!["v2"], vec!["v3"]]),
            ],
        );
        let out = temp_dir.path().join("out");

        convert(&input, &out, ConvertOptions::new());

        for (file, expected) in [("One.json", 1), ("Two.json", 3)] {
            let text = fs::read_to_string(out.join(file)).unwrap();
            assert!(text.starts_with("[\n    {"));
            assert_eq!(text.matches("},").count(), expected - 1);

            let value: serde_json::Value = serde_json::from_str(&text).unwrap();
            assert_eq!(value.as_array().map(Vec::len), Some(expected));
        }
    }

    #[test]
    fn test_sheet_filter_limits_output() {
        let temp_dir = TempDir::new().unwrap();
        let input = write_workbook(
            temp_dir.path(),
            "filter.xlsx",
            &[
                ("Sales 2023", vec![vec!["x"], vec!["1"]]),
                ("Sales 2024", vec![vec!["x"], vec!["2"]]),
                ("Notes", vec![vec!["x"], vec!["3"]]),
            ],
        );
        let out = temp_dir.path().join("out");

        let source = CalamineSource::open(&input).unwrap();
        let sink = DirSink::create(&out).unwrap();
        let filter = SheetFilter::new(&["Sales*".to_string()]).unwrap();
        let coordinator = Coordinator::new(ConvertOptions::new(), filter);

        let sheets = coordinator.discover(&source);
        assert_eq!(sheets, vec!["Sales 2023", "Sales 2024"]);

        coordinator.run(&source, &sink, &sheets, &Statistics::new(sheets.len()));

        assert!(out.join("Sales 2023.json").is_file());
        assert!(out.join("Sales 2024.json").is_file());
        assert!(!out.join("Notes.json").exists());
    }

    #[test]
    fn test_existing_output_is_overwritten() {
        let temp_dir = TempDir::new().unwrap();
        let input = write_people_workbook(temp_dir.path());
        let out = temp_dir.path().join("out");
        fs::create_dir_all(&out).unwrap();
        fs::write(out.join("People.json"), "stale").unwrap();

        convert(&input, &out, ConvertOptions::new());

        let value = read_json(&out.join("People.json"));
        assert_eq!(value[0]["First Name"], "Ann");
    }
}

mod isolation_tests {
    use super::*;
    use sheet2json::{
        ConvertError, ConvertOptions, Coordinator, DirSink, FileSink, MemorySource, Result, Row,
        RowCursor, SheetFilter, SheetSource, Statistics,
    };

    /// 특정 시트의 커서가 중간에 실패하는 원본
    struct FlakySource {
        inner: MemorySource,
        broken: &'static str,
        fail_after: usize,
    }

    impl SheetSource for FlakySource {
        fn sheet_names(&self) -> Vec<String> {
            self.inner.sheet_names()
        }

        fn rows(&self, sheet: &str) -> Result<RowCursor<'_>> {
            let rows = self.inner.rows(sheet)?;
            if sheet != self.broken {
                return Ok(rows);
            }

            let fail_after = self.fail_after;
            let sheet = sheet.to_string();
            Ok(Box::new(rows.enumerate().map(move |(idx, row)| {
                if idx == fail_after {
                    Err(ConvertError::RowRead {
                        sheet: sheet.clone(),
                        row: idx + 1,
                        reason: "truncated stream".to_string(),
                    })
                } else {
                    row
                }
            })))
        }
    }

    /// 특정 대상 이름만 쓰기에 실패하는 싱크
    struct PickySink {
        inner: DirSink,
        reject: &'static str,
    }

    impl FileSink for PickySink {
        fn write(&self, target: &str, text: &str) -> Result<PathBuf> {
            if target == self.reject {
                return Err(ConvertError::Write {
                    path: PathBuf::from(target),
                    reason: "read-only".to_string(),
                });
            }
            self.inner.write(target, text)
        }
    }

    fn row(cells: &[&str]) -> Row {
        cells.iter().map(|s| s.to_string()).collect()
    }

    fn two_sheets() -> MemorySource {
        MemorySource::new()
            .with_sheet("A", vec![row(&["id"]), row(&["1"]), row(&["2"])])
            .with_sheet(
                "B",
                vec![row(&["id"]), row(&["10"]), row(&["20"]), row(&["30"])],
            )
    }

    #[test]
    fn test_cursor_failure_only_aborts_that_sheet() {
        let temp_dir = TempDir::new().unwrap();
        let source = FlakySource {
            inner: two_sheets(),
            broken: "B",
            fail_after: 2,
        };
        let sink = DirSink::new(temp_dir.path());
        let coordinator =
            Coordinator::new(ConvertOptions::new().with_indent(None), SheetFilter::all());

        let sheets = coordinator.discover(&source);
        let stats = Statistics::new(sheets.len());
        coordinator.run(&source, &sink, &sheets, &stats);

        assert_eq!(
            fs::read_to_string(temp_dir.path().join("A.json")).unwrap(),
            r#"[{"id":"1"},{"id":"2"}]"#
        );
        assert!(!temp_dir.path().join("B.json").exists());
        assert_eq!(stats.get_success_count(), 1);
        assert_eq!(stats.get_error_count(), 1);
    }

    #[test]
    fn test_header_failure_leaves_no_file() {
        let temp_dir = TempDir::new().unwrap();
        let source = FlakySource {
            inner: two_sheets(),
            broken: "A",
            fail_after: 0,
        };
        let sink = DirSink::new(temp_dir.path());
        let coordinator = Coordinator::new(ConvertOptions::new(), SheetFilter::all());

        let sheets = coordinator.discover(&source);
        let stats = Statistics::new(sheets.len());
        coordinator.run(&source, &sink, &sheets, &stats);

        assert!(!temp_dir.path().join("A.json").exists());
        assert!(temp_dir.path().join("B.json").is_file());
    }

    #[test]
    fn test_write_failure_only_aborts_that_sheet() {
        let temp_dir = TempDir::new().unwrap();
        let source = two_sheets();
        let sink = PickySink {
            inner: DirSink::new(temp_dir.path()),
            reject: "A.json",
        };
        let coordinator = Coordinator::new(ConvertOptions::new(), SheetFilter::all());

        let sheets = coordinator.discover(&source);
        let stats = Statistics::new(sheets.len());
        coordinator.run(&source, &sink, &sheets, &stats);

        assert!(!temp_dir.path().join("A.json").exists());
        let value = read_json(&temp_dir.path().join("B.json"));
        assert_eq!(value.as_array().map(Vec::len), Some(3));
        assert_eq!(stats.get_error_count(), 1);
    }

    #[test]
    fn test_many_sheets_all_complete() {
        let temp_dir = TempDir::new().unwrap();
        let source = (0..32).fold(MemorySource::new(), |src, i| {
            src.with_sheet(
                format!("S{:02}", i),
                vec![row(&["n"]), vec![i.to_string()]],
            )
        });
        let sink = DirSink::new(temp_dir.path());
        let coordinator = Coordinator::new(ConvertOptions::new(), SheetFilter::all());

        let sheets = coordinator.discover(&source);
        let stats = Statistics::new(sheets.len());
        coordinator.run(&source, &sink, &sheets, &stats);

        assert_eq!(stats.get_success_count(), 32);
        for i in 0..32 {
            let value = read_json(&temp_dir.path().join(format!("S{:02}.json", i)));
            assert_eq!(value[0]["n"], i.to_string());
        }
    }
}

mod error_tests {
    use sheet2json::{CalamineSource, ConvertError};
    use std::path::PathBuf;

    #[test]
    fn test_missing_input_is_fatal() {
        let err = CalamineSource::open("/definitely/not/here.xlsx")
            .err()
            .unwrap();
        assert!(err.is_fatal());
        assert!(err.to_string().contains("입력 파일을 찾을 수 없습니다"));
    }

    #[test]
    fn test_unreadable_workbook_is_fatal() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("fake.xlsx");
        std::fs::write(&path, "this is not a zip archive").unwrap();

        let err = CalamineSource::open(&path).err().unwrap();
        assert!(matches!(err, ConvertError::WorkbookOpen { .. }));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_write_error_display() {
        let error = ConvertError::Write {
            path: PathBuf::from("out/Sheet1.json"),
            reason: "permission denied".to_string(),
        };
        let msg = error.to_string();
        assert!(msg.contains("파일 쓰기 실패"));
        assert!(msg.contains("Sheet1.json"));
        assert!(!error.is_fatal());
    }
}
