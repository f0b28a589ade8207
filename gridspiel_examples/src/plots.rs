use std::cmp::Ordering;
use std::path::Path;
use log::debug;
use plotters::prelude::*;

pub struct Series{
    pub data: Vec<f32>,
    pub description: String,
    pub color: RGBColor,
}

impl Series{
    pub fn new(data: Vec<f32>, description: impl Into<String>, color: RGBColor) -> Self{
        Self{data, description: description.into(), color}
    }
}

/// Average of every window of last `window` values (shorter at the beginning).
pub fn moving_average(data: &[f64], window: usize) -> Vec<f32>{
    let window = window.max(1);
    let mut sum = 0.0;
    data.iter().enumerate().map(|(i, v)| {
        sum += v;
        if i >= window{
            sum -= data[i - window];
        }
        (sum / (i + 1).min(window) as f64) as f32
    }).collect()
}

fn lowest(data: &[f32]) -> f32{
    match data.iter().min_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal)){
        Some(n) if *n < 0.0 => *n,
        _ => 0.0
    }
}

fn highest(data: &[f32]) -> f32{
    match data.iter().max_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal)){
        Some(n) if *n > 0.0 => *n,
        _ => 0.0
    }
}

pub fn plot_many_series(file: &Path, caption: &str, series: &[Series], x_desc: &str, y_desc: &str) -> Result<(), Box<dyn std::error::Error>>{
    let root  = SVGBackend::new(&file, (1024, 768)).into_drawing_area();
    root.fill(&WHITE)?;

    let global_min = series.iter().map(|s| lowest(&s.data)).fold(0.0f32, f32::min);
    let global_max = series.iter().map(|s| highest(&s.data)).fold(0.0f32, f32::max);
    let global_max = if global_max <= global_min {global_min + 1.0} else {global_max};
    let length = series.iter().map(|s| s.data.len()).max().unwrap_or(0).max(1);

    debug!("Plotting globals: min = {}; max = {}", global_min, global_max);

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 40).into_font())
        .margin(5)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0.0..length as f32, global_min..global_max)?;

    chart.configure_mesh()
        .disable_mesh()
        .x_desc(x_desc)
        .y_desc(y_desc)
        .draw()?;

    for s in series{
        chart
            .draw_series(LineSeries::new(
                s.data.iter().enumerate().map(|(x, y)| (x as f32, *y)),
                &s.color,
            ))?
            .label(s.description.as_str())
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], s.color));

    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;

    Ok(())
}

#[cfg(test)]
mod tests{
    use crate::plots::moving_average;

    #[test]
    fn moving_average_window(){
        assert_eq!(moving_average(&[2.0, 4.0, 6.0, 8.0], 2), vec![2.0, 3.0, 5.0, 7.0]);
        assert_eq!(moving_average(&[1.0, 3.0], 0), vec![1.0, 3.0]);
        assert!(moving_average(&[], 5).is_empty());
    }
}
