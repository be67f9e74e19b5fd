//! SVG serialization of a [`Scene`].

use std::fmt;

use super::{Circle, Line, Scene, Shape, Style};

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Displays a scene as a standalone SVG document.
///
/// An empty scene renders as a bare `<svg>` element with no viewport.
#[derive(Debug, Clone, Copy)]
pub struct Svg<'a>(pub &'a Scene);

impl Scene {
    /// Serializes the scene as an SVG document.
    #[must_use]
    pub fn to_svg(&self) -> String {
        Svg(self).to_string()
    }
}

impl fmt::Display for Svg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scene = self.0;
        let Some(view_box) = scene.view_box() else {
            return write!(f, r#"<svg xmlns="{SVG_NAMESPACE}"></svg>"#);
        };

        writeln!(
            f,
            r#"<svg xmlns="{SVG_NAMESPACE}" height="100dvh" class="tubesheet-svg" viewBox="{} {} {} {}" role="img">"#,
            view_box.min_x, view_box.min_y, view_box.width, view_box.height
        )?;
        writeln!(f, "<title>{}</title>", Escaped(&scene.title))?;
        writeln!(f, "<desc>{}</desc>", Escaped(&scene.description))?;

        for shape in scene.shapes() {
            match shape {
                Shape::Circle(circle) => write_circle(f, circle)?,
                Shape::Line(line) => write_line(f, line)?,
            }
        }

        write!(f, "</svg>")
    }
}

fn write_circle(f: &mut fmt::Formatter<'_>, circle: &Circle) -> fmt::Result {
    write!(
        f,
        r#"<circle cx="{}" cy="{}" r="{}""#,
        circle.center.x,
        circle.center.y,
        circle.diameter / 2.0
    )?;
    if let Some(id) = circle.id {
        write!(f, r#" id="{id}""#)?;
    }
    write_style(f, &circle.style)?;
    writeln!(f, "/>")
}

fn write_line(f: &mut fmt::Formatter<'_>, line: &Line) -> fmt::Result {
    write!(
        f,
        r#"<line x1="{}" y1="{}" x2="{}" y2="{}""#,
        line.from.x, line.from.y, line.to.x, line.to.y
    )?;
    write_style(f, &line.style)?;
    writeln!(f, "/>")
}

fn write_style(f: &mut fmt::Formatter<'_>, style: &Style) -> fmt::Result {
    write!(f, r#" stroke="black" fill="none""#)?;
    if let Some([dash, gap]) = style.dash {
        write!(f, r#" stroke-dasharray="{dash} {gap}""#)?;
    }
    write!(
        f,
        r#" stroke-width="{}" vector-effect="non-scaling-stroke""#,
        style.stroke_width
    )
}

/// Escapes XML markup characters in text content.
struct Escaped<'a>(&'a str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.0.chars() {
            match c {
                '&' => f.write_str("&amp;")?,
                '<' => f.write_str("&lt;")?,
                '>' => f.write_str("&gt;")?,
                '"' => f.write_str("&quot;")?,
                other => write!(f, "{other}")?,
            }
        }
        Ok(())
    }
}
