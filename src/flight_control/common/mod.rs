pub(crate) mod vec2d;

#[cfg(test)]
mod tests;
