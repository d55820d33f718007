mod dom;
mod input;
mod runtime;
mod sensors;
mod session;
mod settings;

fn main() {
    if let Err(err) = runtime::start() {
        gloo::console::warn!("boot: widget not started", err);
    }
}
