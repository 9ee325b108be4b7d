pub mod hospital;
