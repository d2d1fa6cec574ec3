
// text outputs of training and inference

use crate::model::Model;

use ndarray::ArrayView1;

pub const DOCUMENT_COORDINATES_FILE: &str = "document_coordinate.txt";
pub const KEYWORD_COORDINATES_FILE: &str = "words_coordinate.txt";
pub const INFER_FILE: &str = "infer.txt";

fn join_coordinates(label: &str, coordinates: ArrayView1<f64>) -> String {
    let mut line = label.to_string();
    for value in coordinates {
        line.push(' ');
        line.push_str(&value.to_string());
    }
    line
}

/// One `doc<i> <v0> <v1> ...` line per trained document.
pub fn document_coordinates(model: &Model) -> Vec<String> {
    (0..model.n_documents())
    .map(|d| join_coordinates(&format!("doc{}", d), model.document_embedding(d)))
    .collect()
}

/// One `<keyword> <u0> <u1> ...` line per keyword, in id order.
pub fn keyword_coordinates(model: &Model) -> Vec<String> {
    model
    .vocab()
    .keywords()
    .iter()
    .enumerate()
    .map(|(i, keyword)| join_coordinates(keyword, model.term_embedding(i)))
    .collect()
}

/// `doc<d1>(<angle1>) ,doc<d2>(<angle2>) ...`
pub fn infer_line(ranked: &[(usize, f64)]) -> String {
    ranked
    .iter()
    .map(|(d, angle)| format!("doc{}({})", d, angle))
    .collect::<Vec<String>>()
    .join(" ,")
}
