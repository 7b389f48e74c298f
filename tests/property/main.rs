mod chain;
mod gate;
