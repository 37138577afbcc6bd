//! Plugin module whose registration panics

use plughost::plugin::api::PluginRegistrar;

fn register(_registrar: &mut dyn PluginRegistrar) {
    panic!("registration blew up");
}

plughost::declare_plugin!(register: register);
