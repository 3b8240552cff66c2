pub mod oscillator;
