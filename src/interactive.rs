//! Interactive console session.
//!
//! Asks for the composition, care variant, sizes and colors, runs one
//! batch, and prints where the PDFs went. Reads from any `BufRead` and
//! writes to any `Write` so sessions can be scripted.

use std::io::{BufRead, Write};
use std::path::Path;

use crate::batch::{BatchReport, LabelGenerator, LabelRequest};
use crate::catalog::{CareType, LabelColor, Size};
use crate::error::LabelError;

const RULE: &str = "======================================================================";

/// `1` selects washable; anything else selects not washable.
pub fn parse_care_choice(choice: &str) -> CareType {
    if choice.trim() == "1" {
        CareType::Washable
    } else {
        CareType::NotWashable
    }
}

/// Comma-separated sizes, silently dropping tokens outside [`Size::ALL`].
pub fn parse_size_list(input: &str) -> Vec<Size> {
    input
        .split(',')
        .filter_map(|token| token.trim().parse::<Size>().ok())
        .collect()
}

/// `1` white, `2` black, anything else both.
pub fn parse_color_choice(choice: &str) -> Vec<LabelColor> {
    match choice.trim() {
        "1" => vec![LabelColor::White],
        "2" => vec![LabelColor::Black],
        _ => LabelColor::ALL.to_vec(),
    }
}

fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, text: &str) -> Result<String, LabelError> {
    write!(out, "{}", text)?;
    out.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Run one interactive session. Returns `None` if the user gave no
/// composition.
pub fn run<R: BufRead, W: Write>(
    generator: &LabelGenerator,
    output_root: &Path,
    input: &mut R,
    out: &mut W,
) -> Result<Option<BatchReport>, LabelError> {
    writeln!(out, "\n{}", RULE)?;
    writeln!(out, "ГЕНЕРАТОР ЭТИКЕТОК HERSELF19")?;
    writeln!(out, "{}", RULE)?;

    writeln!(out, "\nВведите состав материалов")?;
    writeln!(out, " Формат: XX% Материал1, YY% Материал2")?;
    writeln!(out, " Пример: 95% Хлопок, 5% Эластан")?;
    let composition = prompt(input, out, "\nВаш состав: ")?;
    if composition.is_empty() {
        writeln!(out, "Состав не может быть пустым!")?;
        return Ok(None);
    }

    writeln!(out, "\nВыберите вариант правил ухода:")?;
    writeln!(out, " 1 - Стирать можно")?;
    writeln!(out, " 2 - Стирать нельзя")?;
    let care_type = parse_care_choice(&prompt(input, out, "\nВаш выбор (1 или 2): ")?);

    writeln!(out, "\nКакие размеры генерировать?")?;
    writeln!(out, " 0 - Все размеры")?;
    writeln!(out, " 1 - Выбрать конкретные")?;
    let sizes = if prompt(input, out, "\nВаш выбор (0 или 1): ")? == "1" {
        parse_size_list(&prompt(input, out, " Введите размеры через запятую: ")?)
    } else {
        Size::ALL.to_vec()
    };

    writeln!(out, "\nКакие цвета генерировать?")?;
    writeln!(out, " 0 - Оба цвета")?;
    writeln!(out, " 1 - Только белый")?;
    writeln!(out, " 2 - Только чёрный")?;
    let colors = parse_color_choice(&prompt(input, out, "\nВаш выбор (0, 1 или 2): ")?);

    writeln!(out, "\nГенерирую этикетки...")?;
    let request = LabelRequest::new(composition, care_type, sizes, colors);
    let report = generator.generate(&request, output_root);

    let shown = std::path::absolute(&report.output_dir).unwrap_or_else(|_| report.output_dir.clone());
    writeln!(out, "\n{}", RULE)?;
    writeln!(out, "Готово! Создано {} этикеток", report.generated)?;
    if report.errors > 0 {
        writeln!(out, "Ошибок: {}", report.errors)?;
    }
    writeln!(out, "Папка: {}", shown.display())?;
    writeln!(out, "{}\n", RULE)?;

    Ok(Some(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TemplateStore;
    use crate::config::LabelConfig;
    use crate::render::font::FontResolver;
    use std::io::Cursor;

    #[test]
    fn test_care_choice() {
        assert_eq!(parse_care_choice("1"), CareType::Washable);
        assert_eq!(parse_care_choice(" 2 "), CareType::NotWashable);
        assert_eq!(parse_care_choice("whatever"), CareType::NotWashable);
    }

    #[test]
    fn test_size_list_filters_unknown_tokens() {
        assert_eq!(
            parse_size_list("36, 50, ONE SIZE,XL, 48"),
            vec![Size::S36, Size::OneSize, Size::S48]
        );
        assert!(parse_size_list("").is_empty());
    }

    #[test]
    fn test_color_choice() {
        assert_eq!(parse_color_choice("1"), vec![LabelColor::White]);
        assert_eq!(parse_color_choice("2"), vec![LabelColor::Black]);
        assert_eq!(parse_color_choice("0"), LabelColor::ALL.to_vec());
        assert_eq!(parse_color_choice("9"), LabelColor::ALL.to_vec());
    }

    #[test]
    fn test_empty_composition_stops_session() {
        let root = tempfile::tempdir().unwrap();
        let generator = LabelGenerator::with_fonts(
            LabelConfig::default(),
            TemplateStore::standard(root.path()),
            FontResolver::builtin(),
        );
        let mut input = Cursor::new("\n");
        let mut out = Vec::new();

        let report = run(&generator, root.path(), &mut input, &mut out).unwrap();
        assert!(report.is_none());
        assert!(String::from_utf8(out).unwrap().contains("Состав не может быть пустым!"));
    }

    #[test]
    fn test_scripted_session_generates_selected_labels() {
        let root = tempfile::tempdir().unwrap();
        let black = image::RgbImage::from_pixel(64, 64, image::Rgb([0, 0, 0]));
        black.save(root.path().join("Group-308.jpg")).unwrap();
        let generator = LabelGenerator::with_fonts(
            LabelConfig::default(),
            TemplateStore::standard(root.path()),
            FontResolver::builtin(),
        );
        let out_root = root.path().join("out");
        // composition, care 1, pick sizes, "50" is not a size, black only
        let mut input = Cursor::new("95% cotton, 5% elastane\n1\n1\n36, 50, ONE SIZE\n2\n");
        let mut out = Vec::new();

        let report = run(&generator, &out_root, &mut input, &mut out)
            .unwrap()
            .expect("session ran");

        assert_eq!(report.generated, 2);
        assert_eq!(report.errors, 0);
        let mut names: Vec<String> = report
            .files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(
            names,
            vec![
                "95% cotton, 5% elastane_36_чёрный.pdf".to_string(),
                "95% cotton, 5% elastane_ONE SIZE_чёрный.pdf".to_string(),
            ]
        );
        assert!(report.files.iter().all(|p| p.exists()));

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Готово! Создано 2 этикеток"));
        assert!(!text.contains("Ошибок:"));
        assert!(text.contains("Папка: "));
        assert!(text.contains("95% cotton, 5% elastane"));
    }
}
