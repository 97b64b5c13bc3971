use crate::models::{Meal, QUICK_ITEMS, TrackerData, WorkoutSlot};
use crate::stats::build_summary;
use std::fmt::Write;

pub fn render_index(data: &TrackerData) -> String {
    let summary = build_summary(data);

    let mut progress = String::new();
    for item in &summary.progress {
        let _ = write!(
            progress,
            r#"<div class="macro"><div class="macro-head"><span>{name}</span><span>{current}/{target}g</span></div><div class="bar"><div class="fill" style="width: {width:.0}%"></div></div><span class="percent">{percent:.0}%</span></div>"#,
            name = item.name,
            current = item.current,
            target = item.target,
            width = item.percent.clamp(0.0, 100.0),
            percent = item.percent,
        );
    }

    let mut meals = String::new();
    for meal in Meal::ALL {
        let _ = write!(meals, r#"<div class="card"><h3>{}</h3><ul>"#, title(meal.as_str()));
        let items = data.daily_food.meal(meal);
        if items.is_empty() {
            meals.push_str(r#"<li class="empty">Nothing yet</li>"#);
        }
        for (index, item) in items.iter().enumerate() {
            let _ = write!(
                meals,
                r#"<li><span>{name}</span><span>{p}P/{c}C/{f}F</span><form method="post" action="/food/remove"><input type="hidden" name="meal" value="{meal}" /><input type="hidden" name="index" value="{index}" /><button type="submit" class="delete">Remove</button></form></li>"#,
                name = escape_html(&item.name),
                p = item.protein,
                c = item.carbs,
                f = item.fat,
                meal = meal,
                index = index,
            );
        }
        meals.push_str("</ul></div>");
    }

    let mut workouts = String::new();
    for slot in WorkoutSlot::ALL {
        let record = data.workout_data.slot(slot);
        let notes = record.map(|r| escape_html(&r.notes)).unwrap_or_default();
        let saved = record
            .map(|r| format!("Saved {}", r.date.format("%Y-%m-%d %H:%M UTC")))
            .unwrap_or_else(|| "Not saved".to_string());
        let _ = write!(
            workouts,
            r#"<form class="card" method="post" action="/workout"><h3>{label}</h3><input type="hidden" name="slot" value="{slot}" /><textarea name="notes" rows="4">{notes}</textarea><div class="row"><span class="muted">{saved}</span><button type="submit">Save</button></div></form>"#,
            label = slot_label(slot),
            slot = slot,
            notes = notes,
            saved = saved,
        );
    }

    let mut history = String::new();
    if data.weekly_history.is_empty() {
        history.push_str(r#"<tr><td colspan="5" class="empty">No history yet</td></tr>"#);
    }
    for entry in &data.weekly_history {
        let _ = write!(
            history,
            "<tr><td>{}</td><td>{}g</td><td>{}g</td><td>{}g</td><td>{}</td></tr>",
            entry.date,
            entry.macros.protein,
            entry.macros.carbs,
            entry.macros.fat,
            if entry.trained { "✅" } else { "❌" },
        );
    }

    let mut quick = String::new();
    for item in &QUICK_ITEMS {
        let _ = write!(
            quick,
            r#"<form method="post" action="/food/quick"><input type="hidden" name="item" value="{id}" /><button type="submit" class="quick">{name} <span>{p}P/{c}C/{f}F</span></button></form>"#,
            id = item.id,
            name = escape_html(item.name),
            p = item.protein,
            c = item.carbs,
            f = item.fat,
        );
    }

    let meal_options: String = Meal::ALL
        .iter()
        .map(|meal| format!(r#"<option value="{meal}">{}</option>"#, title(meal.as_str())))
        .collect();

    INDEX_HTML
        .replace("{{DATE}}", &data.current_day.format("%A, %-d %B %Y").to_string())
        .replace("{{PROGRESS}}", &progress)
        .replace("{{MEALS}}", &meals)
        .replace("{{QUICK}}", &quick)
        .replace("{{MEAL_OPTIONS}}", &meal_options)
        .replace("{{WORKOUTS}}", &workouts)
        .replace("{{HISTORY}}", &history)
        .replace("{{STREAK}}", &summary.streak.to_string())
        .replace("{{WEEKLY_PROTEIN}}", &summary.weekly_protein.to_string())
        .replace("{{TRAINED_DAYS}}", &summary.trained_days.to_string())
}

fn slot_label(slot: WorkoutSlot) -> &'static str {
    match slot {
        WorkoutSlot::Day1 => "Day 1",
        WorkoutSlot::Day2 => "Day 2",
        WorkoutSlot::Day3 => "Day 3",
    }
}

fn title(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Fitness Tracker</title>
  <style>
    :root {
      --bg: #f4f1ea;
      --ink: #23262b;
      --muted: #6b6f76;
      --card: #ffffff;
      --accent: #2f8f5b;
      --danger: #c2463a;
      --shadow: 0 12px 32px rgba(35, 38, 43, 0.12);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      background: var(--bg);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(960px, 100%);
      display: grid;
      gap: 24px;
    }

    h1,
    h2,
    h3 {
      margin: 0;
    }

    .muted,
    .empty {
      color: var(--muted);
    }

    .grid {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(240px, 1fr));
      gap: 16px;
    }

    .card {
      background: var(--card);
      border-radius: 16px;
      box-shadow: var(--shadow);
      padding: 18px;
      display: grid;
      gap: 10px;
    }

    .macro-head,
    .row,
    li {
      display: flex;
      justify-content: space-between;
      align-items: center;
      gap: 8px;
    }

    .bar {
      height: 10px;
      border-radius: 999px;
      background: #e6e3dc;
      overflow: hidden;
    }

    .fill {
      height: 100%;
      background: var(--accent);
    }

    ul {
      list-style: none;
      margin: 0;
      padding: 0;
      display: grid;
      gap: 6px;
    }

    input,
    select,
    textarea {
      font: inherit;
      padding: 8px;
      border: 1px solid #d6d2c9;
      border-radius: 8px;
      width: 100%;
    }

    button {
      font: inherit;
      border: none;
      border-radius: 999px;
      padding: 8px 16px;
      background: var(--accent);
      color: #fff;
      cursor: pointer;
    }

    button.delete,
    .reset button {
      background: var(--danger);
    }

    .quick-list {
      display: flex;
      flex-wrap: wrap;
      gap: 8px;
    }

    button.quick span {
      opacity: 0.8;
      font-size: 0.85em;
    }

    table {
      width: 100%;
      border-collapse: collapse;
    }

    td,
    th {
      padding: 8px;
      text-align: left;
      border-bottom: 1px solid #eee;
    }

    .stat {
      font-size: 2rem;
      font-weight: 600;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Fitness Tracker</h1>
      <p class="muted">{{DATE}}</p>
    </header>

    <section class="grid">
      <div class="card"><span class="muted">Streak</span><span class="stat" id="streak">{{STREAK}}</span></div>
      <div class="card"><span class="muted">Protein this week</span><span class="stat" id="weekly-protein">{{WEEKLY_PROTEIN}}g</span></div>
      <div class="card"><span class="muted">Trained days</span><span class="stat" id="trained-days">{{TRAINED_DAYS}}</span></div>
    </section>

    <section class="card">
      <h2>Today</h2>
      {{PROGRESS}}
    </section>

    <section class="grid">{{MEALS}}</section>

    <form class="card" method="post" action="/food/add">
      <h2>Add food</h2>
      <input name="name" placeholder="Name" required />
      <div class="row">
        <input name="protein" type="number" value="0" aria-label="Protein" />
        <input name="carbs" type="number" value="0" aria-label="Carbs" />
        <input name="fat" type="number" value="0" aria-label="Fat" />
      </div>
      <div class="row">
        <select name="meal">{{MEAL_OPTIONS}}</select>
        <button type="submit">Add</button>
      </div>
    </form>

    <section class="card">
      <h2>Quick add</h2>
      <div class="quick-list">{{QUICK}}</div>
    </section>

    <section class="grid">{{WORKOUTS}}</section>

    <section class="card">
      <h2>Last 7 days</h2>
      <table>
        <thead><tr><th>Date</th><th>Protein</th><th>Carbs</th><th>Fat</th><th>Trained</th></tr></thead>
        <tbody id="history-body">{{HISTORY}}</tbody>
      </table>
    </section>

    <form class="card reset" method="post" action="/reset">
      <label><input type="checkbox" name="confirm" required /> Clear everything logged today</label>
      <button type="submit">Reset day</button>
    </form>
  </main>
</body>
</html>
"#;
