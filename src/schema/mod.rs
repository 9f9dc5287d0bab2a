pub mod utopia;
