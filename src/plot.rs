use std::{error::Error, ops::Range, path::Path};
use ndarray::ArrayView1;
use ndarray_stats::QuantileExt;
use plotters::prelude::*;

use crate::model::Model;

pub const VISUALIZATION_FILE: &str = "visualization.svg";

// min and max over keywords, documents and the origin along one latent axis
fn axis_range(terms: ArrayView1<f64>, documents: ArrayView1<f64>) -> Result<Range<f64>, Box<dyn Error>> {

    let low = (*terms.min()?).min(*documents.min()?).min(0.0);
    let high = (*terms.max()?).max(*documents.max()?).max(0.0);

    // leave room for the labels
    let pad = if high > low { (high - low) * 0.1 } else { 1.0 };
    Ok(Range{start: low - pad, end: high + pad})
}

/// Draws keywords (dots), trained documents (crosses) and the origin of a 2 dimensional model.
pub fn draw_2d(model: &Model, save_to: &Path) -> Result<(), Box<dyn Error>> {

    const MARGIN: u32 = 15;
    const FONT_STYLE: (&str, i32) = ("sans-serif", 12);

    if model.dimension() != 2 {
        return Err(format!("can only draw a 2 dimensional model, got {}", model.dimension()).into());
    }

    let u_k = model.term_embeddings();
    let v_k = model.document_embeddings();
    let x_spec = axis_range(u_k.column(0), v_k.row(0))?;
    let y_spec = axis_range(u_k.column(1), v_k.row(1))?;

    let root_area = SVGBackend::new(save_to, (960, 960)).into_drawing_area();
    root_area.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root_area)
    .caption("LSA", FONT_STYLE.into_font())
    .margin(MARGIN)
    .x_label_area_size(30)
    .y_label_area_size(50)
    .build_cartesian_2d(x_spec, y_spec)?;

    chart
    .configure_mesh()
    .disable_x_mesh()
    .disable_y_mesh()
    .x_desc("x")
    .y_desc("y")
    .draw()?;

    let text_style = TextStyle::from(FONT_STYLE).color(&BLACK);

    // a closure for keyword label and position
    let keyword_at = |x: f64, y: f64, keyword: String| {
        return EmptyElement::at((x, y))
            + Circle::new((0, 0), 3, ShapeStyle::from(&BLACK).filled())
            + Text::new(keyword, (6, 6), text_style.clone());
    };

    // and one for documents
    let document_at = |x: f64, y: f64, label: String| {
        return EmptyElement::at((x, y))
            + Cross::new((0, 0), 4, ShapeStyle::from(&RED).stroke_width(2))
            + Text::new(label, (6, 6), text_style.clone());
    };

    for (i, keyword) in model.vocab().keywords().iter().enumerate() {
        chart.plotting_area().draw(&keyword_at(u_k[[i, 0]], u_k[[i, 1]], keyword.to_string()))?;
    }
    for d in 0..model.n_documents() {
        chart.plotting_area().draw(&document_at(v_k[[0, d]], v_k[[1, d]], format!("doc{}", d)))?;
    }
    chart.plotting_area().draw(&Circle::new((0.0, 0.0), 5, ShapeStyle::from(&BLUE).filled()))?;

    root_area.present()?;
    Ok(())

}
