use std::fmt;

use crate::{
    error::{OutlineError, Result},
    types::{Direction, Edge, Loop, Vertex},
};

/// One directive of the compact path description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathCommand {
    /// Absolute move to the loop's start vertex.
    MoveTo(Vertex),
    /// Relative straight run of `length` grid units.
    Travel { direction: Direction, length: usize },
    /// Close the current loop.
    Close,
}

impl fmt::Display for PathCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MoveTo(vertex) => write!(f, "M{} {}", vertex.x, vertex.y),
            Self::Travel { direction, length } => match direction {
                Direction::Up => write!(f, "v-{length}"),
                Direction::Down => write!(f, "v{length}"),
                Direction::Left => write!(f, "h-{length}"),
                Direction::Right => write!(f, "h{length}"),
            },
            Self::Close => f.write_str("z"),
        }
    }
}

/// Encode a loop as move, one travel per run of same-direction edges, close.
pub fn encode_loop(edge_loop: &Loop) -> Vec<PathCommand> {
    let Some(start) = edge_loop.start() else {
        return Vec::new();
    };

    let mut commands = vec![PathCommand::MoveTo(start)];
    for run in edge_loop
        .edges()
        .chunk_by(|prev, next| prev.direction == next.direction)
    {
        commands.push(PathCommand::Travel {
            direction: run[0].direction,
            length: run.len(),
        });
    }
    commands.push(PathCommand::Close);
    commands
}

/// Serialize all loops into one path data string.
pub fn encode_path(loops: &[Loop]) -> String {
    let mut data = String::new();
    for edge_loop in loops {
        for command in encode_loop(edge_loop) {
            data.push_str(&command.to_string());
        }
    }
    data
}

/// Parse path data written by [`encode_path`] back into unit-edge loops.
///
/// Only the `M`, `h`, `v` and `z` directives are understood. Every loop
/// must return to its start before `z`, and every vertex must stay on the
/// `(module_count + 1)^2` lattice.
pub fn decode_path(data: &str, module_count: usize) -> Result<Vec<Loop>> {
    let mut reader = Reader { data: data.as_bytes(), pos: 0 };
    let mut loops = Vec::new();
    let mut open: Option<(Vertex, Vertex, Vec<Edge>)> = None;

    while let Some(byte) = reader.next_command() {
        match byte {
            b'M' => {
                if open.is_some() {
                    return Err(reader.error("move before the previous loop was closed"));
                }
                let x = reader.number()?;
                reader.expect(b' ')?;
                let y = reader.number()?;
                if x > module_count || y > module_count {
                    return Err(reader.error("move leaves the grid"));
                }
                let start = Vertex::new(x, y);
                open = Some((start, start, Vec::new()));
            }
            b'h' | b'v' => {
                let negative = reader.eat(b'-');
                let length = reader.number()?;
                let direction = match (byte, negative) {
                    (b'h', false) => Direction::Right,
                    (b'h', true) => Direction::Left,
                    (_, false) => Direction::Down,
                    (_, true) => Direction::Up,
                };
                let Some((_, at, edges)) = open.as_mut() else {
                    return Err(reader.error("travel before a move"));
                };
                // Check the whole run before expanding it into unit edges
                let from = if direction.is_vertical() { at.y } else { at.x };
                let end = match direction {
                    Direction::Left | Direction::Up => from.checked_sub(length),
                    Direction::Right | Direction::Down => {
                        from.checked_add(length).filter(|&end| end <= module_count)
                    }
                };
                if end.is_none() {
                    return Err(reader.error("travel leaves the grid"));
                }
                for _ in 0..length {
                    let edge = Edge { start: *at, direction };
                    *at = edge.end();
                    edges.push(edge);
                }
            }
            b'z' => {
                let Some((start, at, edges)) = open.take() else {
                    return Err(reader.error("close without an open loop"));
                };
                if at != start || edges.is_empty() {
                    return Err(reader.error("loop does not return to its start"));
                }
                loops.push(Loop::new(edges));
            }
            other => {
                return Err(reader.error(&format!("unknown directive {:?}", other as char)));
            }
        }
    }

    if open.is_some() {
        return Err(reader.error("path ends inside an open loop"));
    }
    Ok(loops)
}

struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl Reader<'_> {
    fn error(&self, message: &str) -> OutlineError {
        OutlineError::PathSyntax {
            offset: self.pos,
            message: message.to_string(),
        }
    }

    fn next_command(&mut self) -> Option<u8> {
        while self.data.get(self.pos).is_some_and(u8::is_ascii_whitespace) {
            self.pos += 1;
        }
        let byte = self.data.get(self.pos).copied();
        if byte.is_some() {
            self.pos += 1;
        }
        byte
    }

    fn eat(&mut self, byte: u8) -> bool {
        if self.data.get(self.pos) == Some(&byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, byte: u8) -> Result<()> {
        if self.eat(byte) {
            Ok(())
        } else {
            Err(self.error(&format!("expected {:?}", byte as char)))
        }
    }

    fn number(&mut self) -> Result<usize> {
        let begin = self.pos;
        while self.data.get(self.pos).is_some_and(u8::is_ascii_digit) {
            self.pos += 1;
        }
        std::str::from_utf8(&self.data[begin..self.pos])
            .ok()
            .and_then(|digits| digits.parse().ok())
            .ok_or_else(|| self.error("expected a number"))
    }
}
