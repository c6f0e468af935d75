use crate::TOOL_NAME;
use crate::report::model::{CategoryCount, Report};

const LIST_LIMIT: usize = 10;

fn push_counts(out: &mut String, title: &str, counts: &[CategoryCount]) {
    out.push_str(&format!("  {title}:\n"));
    for c in counts.iter().take(LIST_LIMIT) {
        out.push_str(&format!("    {:<40} {}\n", c.label, c.count));
    }
}

pub fn render_text(report: &Report) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} {}\n", TOOL_NAME, report.tool.version));
    if let Some(path) = &report.source.path {
        out.push_str(&format!("Source: {path}\n"));
    }
    out.push_str(&format!(
        "Rows: {} ({} bytes, {} {})\n",
        report.dataset.rows,
        report.source.size_bytes,
        report.source.hash.algorithm,
        report.source.hash.value
    ));
    if !report.dataset.columns_absent.is_empty() {
        out.push_str(&format!(
            "Absent columns: {}\n",
            report.dataset.columns_absent.join(", ")
        ));
    }

    let sections = &report.sections;

    if let Some(o) = &sections.overview {
        out.push_str("\n[overview]\n");
        out.push_str(&format!("  Records: {}\n", o.kpis.records));
        if let Some(m) = o.kpis.municipalities {
            out.push_str(&format!("  Municipalities: {m}\n"));
        }
        out.push_str(&format!("  Occurrences: {}\n", o.kpis.occurrences));
        out.push_str(&format!("  Total victims: {}\n", o.kpis.total_victims));
        if let Some(ratio) = o.kpis.victims_per_occurrence {
            out.push_str(&format!("  Victims per occurrence: {ratio:.2}\n"));
        }
        out.push_str(&format!(
            "  With victims: {} / without: {}\n",
            o.victims_split.with_victims,
            o.victims_split.without_victims
        ));
        if let Some(top) = &o.top_municipalities {
            push_counts(&mut out, "Top municipalities", top);
        }
        if let Some(monthly) = &o.monthly {
            out.push_str("  Monthly:\n");
            for m in monthly {
                out.push_str(&format!("    {} {}\n", m.month, m.count));
            }
        }
    }

    if let Some(d) = &sections.distributions {
        out.push_str("\n[distributions]\n");
        if let Some(counts) = &d.variable_counts {
            push_counts(&mut out, &d.variable.to_string(), counts);
        }
        if let Some(ranges) = &d.age_ranges {
            push_counts(&mut out, "Age ranges", ranges);
        }
        if let Some(types) = &d.vehicle_types {
            push_counts(&mut out, "Vehicle types", types);
        }
        if let Some(types) = &d.accident_types {
            push_counts(&mut out, "Accident types", types);
        }
        if let Some(weather) = &d.weather {
            out.push_str("  Weather:\n");
            for w in weather.iter().take(LIST_LIMIT) {
                out.push_str(&format!("    {:<40} {} ({:.2}%)\n", w.label, w.count, w.share));
            }
        }
        if let Some(brands) = &d.brands {
            push_counts(&mut out, "Brands", brands);
        }
    }

    if let Some(t) = &sections.time {
        out.push_str("\n[time]\n");
        if let Some(days) = &t.day_of_week {
            push_counts(&mut out, "Day of week", days);
        }
        if let Some(hours) = &t.hours {
            let busiest = hours.iter().max_by_key(|h| (h.count, std::cmp::Reverse(h.hour)));
            if let Some(h) = busiest {
                out.push_str(&format!("  Busiest hour: {:02}h ({})\n", h.hour, h.count));
            }
        }
        if let Some(monthly) = &t.monthly {
            out.push_str(&format!("  Months with data: {}\n", monthly.len()));
        }
    }

    if let Some(s) = &sections.severity {
        out.push_str("\n[severity]\n");
        out.push_str(&format!("  Units ({:?}): {}\n", s.level, s.units));
        out.push_str(&format!(
            "  With victims: {} / without: {}\n",
            s.victims_split.with_victims,
            s.victims_split.without_victims
        ));
        for t in &s.totals {
            out.push_str(&format!("    {:<40} {}\n", t.counter, t.total));
        }
    }

    if let Some(g) = &sections.geography {
        out.push_str("\n[geography]\n");
        out.push_str(&format!(
            "  Located: {} / unlocated: {} (plotted {})\n",
            g.with_coordinates,
            g.without_coordinates,
            g.points.len()
        ));
    }

    if let Some(t) = &sections.tables {
        out.push_str("\n[tables]\n");
        if let Some(rows) = &t.municipalities {
            out.push_str("  Municipalities:\n");
            for r in rows {
                out.push_str(&format!(
                    "    {:<40} {:>6} {:>6} {:>6}\n",
                    r.municipality,
                    r.accidents,
                    r.with_victims,
                    r.deaths
                ));
            }
        }
        if let Some(types) = &t.accident_types {
            push_counts(&mut out, "Accident types", types);
        }
    }

    out
}
