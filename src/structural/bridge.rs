// Bridge: shapes (abstraction) hold a renderer (implementation), so two
// shapes and two renderers give four behaviors from four small types.

use std::io;
use std::rc::Rc;

use crate::transcript::Transcript;

/// Implementation side.
pub trait Renderer {
    fn name(&self) -> &'static str;
    fn circle(&self, x: i32, y: i32, radius: i32) -> String;
    fn rectangle(&self, x: i32, y: i32, w: i32, h: i32) -> String;
}

pub struct OpenGl;
impl Renderer for OpenGl {
    fn name(&self) -> &'static str {
        "opengl"
    }
    fn circle(&self, x: i32, y: i32, radius: i32) -> String {
        format!("glDrawCircle(center=({x},{y}), r={radius})")
    }
    fn rectangle(&self, x: i32, y: i32, w: i32, h: i32) -> String {
        format!("glDrawRect(origin=({x},{y}), {w}x{h})")
    }
}

pub struct Vulkan;
impl Renderer for Vulkan {
    fn name(&self) -> &'static str {
        "vulkan"
    }
    fn circle(&self, x: i32, y: i32, radius: i32) -> String {
        format!("vkCmdDrawCircle[{x} {y} {radius}]")
    }
    fn rectangle(&self, x: i32, y: i32, w: i32, h: i32) -> String {
        format!("vkCmdDrawRect[{x} {y} {w} {h}]")
    }
}

/// Abstraction side.
pub trait Shape {
    fn kind(&self) -> &'static str;
    fn draw(&self) -> String;
}

pub struct Circle {
    x: i32,
    y: i32,
    radius: i32,
    renderer: Rc<dyn Renderer>,
}

impl Circle {
    pub fn new(x: i32, y: i32, radius: i32, renderer: Rc<dyn Renderer>) -> Self {
        Self {
            x,
            y,
            radius,
            renderer,
        }
    }
}

impl Shape for Circle {
    fn kind(&self) -> &'static str {
        "circle"
    }
    fn draw(&self) -> String {
        self.renderer.circle(self.x, self.y, self.radius)
    }
}

pub struct Rectangle {
    x: i32,
    y: i32,
    w: i32,
    h: i32,
    renderer: Rc<dyn Renderer>,
}

impl Rectangle {
    pub fn new(x: i32, y: i32, w: i32, h: i32, renderer: Rc<dyn Renderer>) -> Self {
        Self { x, y, w, h, renderer }
    }
}

impl Shape for Rectangle {
    fn kind(&self) -> &'static str {
        "rectangle"
    }
    fn draw(&self) -> String {
        self.renderer.rectangle(self.x, self.y, self.w, self.h)
    }
}

pub fn run(out: &mut Transcript<'_>) -> io::Result<()> {
    let renderers: [Rc<dyn Renderer>; 2] = [Rc::new(OpenGl), Rc::new(Vulkan)];

    let mut outputs = Vec::new();
    for renderer in &renderers {
        let shapes: [Box<dyn Shape>; 2] = [
            Box::new(Circle::new(10, 20, 5, Rc::clone(renderer))),
            Box::new(Rectangle::new(0, 0, 100, 50, Rc::clone(renderer))),
        ];
        for shape in &shapes {
            let drawn = shape.draw();
            out.line(&format!("{}.{}", shape.kind(), renderer.name()), &drawn)?;
            outputs.push(drawn);
        }
    }

    outputs.sort();
    outputs.dedup();
    out.line("distinct-behaviors", outputs.len())?;
    Ok(())
}
