//! Askama templates for the web frontend.

use askama::Template;

use super::dto::{SearchResponse, TrainResult};

/// Home page with search form.
#[derive(Template)]
#[template(
    ext = "html",
    source = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Train Search</title>
</head>
<body>
  <h1>Train Search</h1>
  <form method="post" action="/search">
    <label>From <input name="source" required placeholder="NDLS"></label>
    <label>To <input name="destination" required placeholder="BCT"></label>
    <label>Date <input name="date" type="date" required></label>
    <button type="submit">Search</button>
  </form>
</body>
</html>
"#
)]
pub struct IndexTemplate;

/// Search results fragment.
#[derive(Template)]
#[template(
    ext = "html",
    source = r#"<section class="results">
{% match message %}{% when Some with (text) %}<p class="empty">{{ text }}</p>
{% when None %}<table>
  <thead>
    <tr><th>Train</th><th>From</th><th>To</th><th>Departs</th><th>Arrives</th><th>Duration</th><th></th></tr>
  </thead>
  <tbody>
{% for train in trains %}    <tr class="{{ train.match_kind }}">
      <td>{{ train.train_number }}</td>
      <td>{{ train.source_station }}</td>
      <td>{{ train.destination_station }}</td>
      <td>{{ train.departure_time }}</td>
      <td>{{ train.arrival_time }}</td>
      <td>{{ train.travel_duration }}</td>
      <td>{% if train.match_kind == "intermediate" %}starts at {{ train.source_station }}, boarding unconfirmed{% endif %}</td>
    </tr>
{% endfor %}  </tbody>
</table>
{% endmatch %}</section>
"#
)]
pub struct ResultsTemplate {
    pub trains: Vec<TrainResult>,
    pub message: Option<String>,
}

impl From<SearchResponse> for ResultsTemplate {
    fn from(response: SearchResponse) -> Self {
        Self {
            trains: response.trains,
            message: response.message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn train(number: &str, kind: &'static str) -> TrainResult {
        TrainResult {
            train_number: number.to_string(),
            source_station: "BCT".to_string(),
            destination_station: "NDLS".to_string(),
            departure_time: "17:00".to_string(),
            arrival_time: "08:32".to_string(),
            travel_duration: "15:32".to_string(),
            match_kind: kind,
            source: "schedules".to_string(),
        }
    }

    #[test]
    fn index_has_form_fields() {
        let html = IndexTemplate.render().unwrap();
        assert!(html.contains(r#"name="source""#));
        assert!(html.contains(r#"name="destination""#));
        assert!(html.contains(r#"name="date""#));
    }

    #[test]
    fn results_render_rows() {
        let html = ResultsTemplate {
            trains: vec![train("12951", "direct"), train("12909", "intermediate")],
            message: None,
        }
        .render()
        .unwrap();
        assert!(html.contains("<td>12951</td>"));
        assert!(html.contains("<td>15:32</td>"));
        assert!(html.contains(r#"<tr class="intermediate">"#));
        assert_eq!(html.matches("boarding unconfirmed").count(), 1);
    }

    #[test]
    fn results_render_empty_message() {
        let html = ResultsTemplate {
            trains: vec![],
            message: Some("No trains found from NDLS to BCT on 2024-03-19".to_string()),
        }
        .render()
        .unwrap();
        assert!(html.contains("No trains found from NDLS to BCT on 2024-03-19"));
        assert!(!html.contains("<table>"));
    }
}
