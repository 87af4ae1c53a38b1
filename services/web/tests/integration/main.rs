
mod flow_test;
mod router_test;
