//! SVG export of the full canvas (decoration + diagram).
//!
//! Output is a single self-contained `<svg>` document whose `viewBox` puts
//! the logical origin at the centre. Component symbols are emitted in local
//! coordinates under `translate(x y) rotate(r)`; wires and dots are already
//! absolute. All caller-supplied text (ids, tags, labels) is XML-escaped here.

use crate::sink::{Canvas, DrawingSink};
use crate::types::{Decoration, Label, PathCmd, Point, Primitive, Shape, SolderDot, SymbolGraphic, WirePath};
use std::f64::consts::{PI, TAU};
use std::fmt::{self, Write};

/// Textual serialization of a drawing surface.
pub trait Export {
    fn export(&self) -> String;
}

impl<T: Export + ?Sized> Export for &T {
    fn export(&self) -> String {
        (**self).export()
    }
}

impl<T: Export + ?Sized> Export for &mut T {
    fn export(&self) -> String {
        (**self).export()
    }
}

impl Export for Canvas {
    fn export(&self) -> String {
        SvgDocument(self).to_string()
    }
}

/// `Display` adapter that renders a [`Canvas`] as SVG.
pub struct SvgDocument<'a>(pub &'a Canvas);

impl fmt::Display for SvgDocument<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let canvas = self.0;
        let (w, h) = (canvas.config().width, canvas.config().height);
        let style = canvas.style();

        writeln!(
            f,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="{} {} {} {}">"#,
            Num(w),
            Num(h),
            Num(-w / 2.0),
            Num(-h / 2.0),
            Num(w),
            Num(h)
        )?;

        // Host layer
        writeln!(f, r#"<g id="decoration">"#)?;
        writeln!(
            f,
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
            Num(-w / 2.0),
            Num(-h / 2.0),
            Num(w),
            Num(h),
            Escaped(&style.background)
        )?;
        if !canvas.decoration().is_empty() {
            writeln!(f, r#"<g stroke="{}" stroke-width="1">"#, Escaped(&style.grid_color))?;
            for deco in canvas.decoration() {
                write_decoration(f, deco)?;
            }
            writeln!(f, "</g>")?;
        }
        writeln!(f, "</g>")?;

        // Engine layer
        writeln!(
            f,
            r#"<g id="diagram" fill="none" stroke-linecap="round" stroke-linejoin="round">"#
        )?;
        for primitive in canvas.primitives() {
            match primitive {
                Primitive::Symbol(g) => write_symbol(f, canvas, g)?,
                Primitive::Wire(w) => write_wire(f, canvas, w)?,
                Primitive::Dot(d) => write_dot(f, canvas, d)?,
            }
        }
        writeln!(f, "</g>")?;
        writeln!(f, "</svg>")
    }
}

fn write_decoration(f: &mut impl Write, deco: &Decoration) -> fmt::Result {
    match deco {
        Decoration::GridLine { from, to } => writeln!(
            f,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}"/>"#,
            Num(from.x),
            Num(from.y),
            Num(to.x),
            Num(to.y)
        ),
    }
}

fn write_symbol(f: &mut impl Write, canvas: &Canvas, g: &SymbolGraphic) -> fmt::Result {
    let style = canvas.style();
    writeln!(
        f,
        r#"<g class="component" id="{}" data-type="{}" transform="translate({} {}) rotate({})" stroke="{}" stroke-width="{}">"#,
        Escaped(&g.id),
        Escaped(&g.kind),
        Num(g.pose.x),
        Num(g.pose.y),
        Num(g.pose.rotation),
        Escaped(&style.stroke),
        Num(style.stroke_width)
    )?;
    for shape in &g.shapes {
        write_shape(f, shape, &style.stroke)?;
    }
    if let Some(label) = &g.label {
        write_label(f, canvas, label)?;
    }
    writeln!(f, "</g>")
}

fn write_shape(f: &mut impl Write, shape: &Shape, fill_color: &str) -> fmt::Result {
    match shape {
        Shape::Path { cmds, filled } => {
            write!(f, r#"<path d=""#)?;
            write_path_data(f, cmds)?;
            if *filled {
                writeln!(f, r#"" fill="{}"/>"#, Escaped(fill_color))
            } else {
                writeln!(f, r#""/>"#)
            }
        }
        Shape::Circle { cx, cy, r, filled } => {
            write!(f, r#"<circle cx="{}" cy="{}" r="{}""#, Num(*cx), Num(*cy), Num(*r))?;
            if *filled {
                writeln!(f, r#" fill="{}"/>"#, Escaped(fill_color))
            } else {
                writeln!(f, "/>")
            }
        }
    }
}

fn write_label(f: &mut impl Write, canvas: &Canvas, label: &Label) -> fmt::Result {
    let style = canvas.style();
    let (x, y) = (Num(label.anchor.x), Num(label.anchor.y));
    writeln!(
        f,
        r#"<text x="{x}" y="{y}" transform="rotate({} {x} {y})" text-anchor="middle" dominant-baseline="central" font-size="{}" font-family="{}" fill="{}" stroke="none">{}</text>"#,
        Num(label.rotation),
        Num(style.font_size),
        Escaped(&style.font_family),
        Escaped(&style.stroke),
        Escaped(&label.text)
    )
}

fn write_wire(f: &mut impl Write, canvas: &Canvas, wire: &WirePath) -> fmt::Result {
    let style = canvas.style();
    write!(
        f,
        r#"<path class="wire" data-from="{}" data-to="{}" d=""#,
        Escaped(&wire.from.to_string()),
        Escaped(&wire.to.to_string())
    )?;
    for (i, p) in wire.points.iter().enumerate() {
        if i > 0 {
            f.write_char(' ')?;
        }
        write!(f, "{} {} {}", if i == 0 { 'M' } else { 'L' }, Num(p.x), Num(p.y))?;
    }
    writeln!(
        f,
        r#"" stroke="{}" stroke-width="{}"/>"#,
        Escaped(&style.wire_color),
        Num(style.wire_width)
    )
}

fn write_dot(f: &mut impl Write, canvas: &Canvas, dot: &SolderDot) -> fmt::Result {
    writeln!(
        f,
        r#"<circle class="solder-dot" cx="{}" cy="{}" r="{}" fill="{}" stroke="none"/>"#,
        Num(dot.center.x),
        Num(dot.center.y),
        Num(dot.radius),
        Escaped(&canvas.style().wire_color)
    )
}

/// Convert path commands to SVG path data.
pub fn write_path_data(f: &mut impl Write, cmds: &[PathCmd]) -> fmt::Result {
    let mut pen: Option<Point> = None;
    let mut subpath_start: Option<Point> = None;
    let mut first = true;

    for cmd in cmds {
        match *cmd {
            PathCmd::MoveTo(x, y) => {
                sep(f, &mut first)?;
                write!(f, "M {} {}", Num(x), Num(y))?;
                pen = Some(Point::new(x, y));
                subpath_start = pen;
            }
            PathCmd::LineTo(x, y) => {
                sep(f, &mut first)?;
                write!(f, "L {} {}", Num(x), Num(y))?;
                pen = Some(Point::new(x, y));
            }
            PathCmd::QuadTo(cx, cy, x, y) => {
                sep(f, &mut first)?;
                write!(f, "Q {} {} {} {}", Num(cx), Num(cy), Num(x), Num(y))?;
                pen = Some(Point::new(x, y));
            }
            PathCmd::ArcTo(cx, cy, r, start, end) => {
                let center = Point::new(cx, cy);
                let from = on_circle(center, r, start);
                match pen {
                    Some(p) if p.distance(from) < 1e-6 => {}
                    Some(_) => {
                        sep(f, &mut first)?;
                        write!(f, "L {} {}", Num(from.x), Num(from.y))?;
                    }
                    None => {
                        sep(f, &mut first)?;
                        write!(f, "M {} {}", Num(from.x), Num(from.y))?;
                        subpath_start = Some(from);
                    }
                }
                let sweep = end - start;
                // SVG cannot draw a full circle as one arc; split it in two.
                let steps: &[f64] = if sweep.abs() >= TAU - 1e-9 {
                    &[0.5, 1.0]
                } else {
                    &[1.0]
                };
                let mut prev = start;
                for &t in steps {
                    let angle = start + sweep * t;
                    let to = on_circle(center, r, angle);
                    let large = u8::from((angle - prev).abs() > PI);
                    let positive = u8::from(angle > prev);
                    sep(f, &mut first)?;
                    write!(
                        f,
                        "A {} {} 0 {} {} {} {}",
                        Num(r),
                        Num(r),
                        large,
                        positive,
                        Num(to.x),
                        Num(to.y)
                    )?;
                    prev = angle;
                    pen = Some(to);
                }
            }
            PathCmd::Close => {
                sep(f, &mut first)?;
                f.write_char('Z')?;
                pen = subpath_start;
            }
        }
    }
    Ok(())
}

fn sep(f: &mut impl Write, first: &mut bool) -> fmt::Result {
    if std::mem::take(first) {
        Ok(())
    } else {
        f.write_char(' ')
    }
}

fn on_circle(center: Point, r: f64, angle: f64) -> Point {
    Point::new(center.x + r * angle.cos(), center.y + r * angle.sin())
}

/// Compact number formatting: at most three decimals, no trailing zeros,
/// no negative zero.
pub struct Num(pub f64);

impl fmt::Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = (self.0 * 1000.0).round() / 1000.0;
        if rounded == 0.0 {
            return f.write_char('0');
        }
        let text = format!("{rounded:.3}");
        let text = if text.contains('.') {
            text.trim_end_matches('0').trim_end_matches('.')
        } else {
            &text
        };
        f.write_str(text)
    }
}

/// XML text/attribute escaping.
pub struct Escaped<'a>(pub &'a str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.0.chars() {
            match c {
                '&' => f.write_str("&amp;")?,
                '<' => f.write_str("&lt;")?,
                '>' => f.write_str("&gt;")?,
                '"' => f.write_str("&quot;")?,
                '\'' => f.write_str("&apos;")?,
                c => f.write_char(c)?,
            }
        }
        Ok(())
    }
}
